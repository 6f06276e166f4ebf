use chrono::Utc;

/// Generates `<prefix><n>` ids where `n` starts at the current time in
/// milliseconds and never goes backwards, even when called twice in the
/// same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator { last: 0 }
    }

    /// Returns a fresh id for which `taken` is false.
    pub fn next(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        let mut n = Utc::now().timestamp_millis().max(self.last + 1);
        loop {
            let candidate = format!("{prefix}{n}");
            if !taken(&candidate) {
                self.last = n;
                return candidate;
            }
            n += 1;
        }
    }
}
