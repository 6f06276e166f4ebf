//! Built-in sample CV used by "load sample data".

use crate::models::document::{
    ContactInfo, Document, Education, EmploymentCategory, Experience, LanguageProficiency,
    SkillCategory, Skills,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(id: &str, name: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        id: id.to_string(),
        name: name.to_string(),
        skills: strings(skills),
        is_visible: true,
    }
}

fn language(name: &str, level: &str) -> LanguageProficiency {
    LanguageProficiency {
        name: name.to_string(),
        level: level.to_string(),
    }
}

/// A complete document that exercises every section and optional field.
pub fn sample_document() -> Document {
    Document {
        name: "Sarah Chen".to_string(),
        title: "Senior Software Engineer & Technical Lead".to_string(),
        summary: "Accomplished software engineer with 8+ years of experience in full-stack \
development, system architecture, and team leadership. Expertise in modern web technologies, \
microservices architecture, and agile methodologies.\n\n\
Passionate about building scalable, maintainable software solutions that drive business growth. \
Strong background in both startup and enterprise environments.\n\n\
Active contributor to open-source projects and technical communities."
            .to_string(),
        contact: ContactInfo {
            email: Some("sarah.chen@email.com".to_string()),
            location: Some("Seattle, WA".to_string()),
            website: Some("sarahchen.dev".to_string()),
            linkedin: Some("linkedin.com/in/sarahchen".to_string()),
            upwork: Some("upwork.com/freelancers/sarahchen".to_string()),
        },
        skills: Skills {
            technical: vec![
                category(
                    "frontend",
                    "Frontend Technologies",
                    &["React", "Vue.js", "TypeScript", "JavaScript", "HTML5", "CSS3", "Next.js"],
                ),
                category(
                    "backend",
                    "Backend & APIs",
                    &["Node.js", "Python", "Java", "GraphQL", "REST APIs", "Microservices"],
                ),
                category(
                    "database",
                    "Databases & Storage",
                    &["PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "DynamoDB"],
                ),
                category(
                    "cloud",
                    "Cloud & DevOps",
                    &["AWS", "Azure", "Docker", "Kubernetes", "CI/CD", "Terraform"],
                ),
                category(
                    "tools",
                    "Tools & Others",
                    &["Git", "Jira", "Figma", "Postman", "Jest", "Cypress"],
                ),
            ],
        },
        languages: vec![
            language("English", "Native"),
            language("Mandarin", "Native"),
            language("Spanish", "Intermediate"),
            language("Japanese", "Basic"),
        ],
        experience: vec![
            Experience {
                id: "exp1".to_string(),
                title: "Senior Software Engineer & Technical Lead".to_string(),
                company: "Microsoft".to_string(),
                company_link: Some("https://microsoft.com".to_string()),
                period: "2021 - Present".to_string(),
                description: "Lead a cross-functional team of 8 engineers developing cloud-native \
applications for enterprise customers. Architect and implement scalable microservices on Azure.\n\n\
Collaborate with product managers, designers, and stakeholders to deliver high-impact features."
                    .to_string(),
                tech_stack: strings(&["React", "TypeScript", "Node.js", "Azure", "PostgreSQL", "Kubernetes"]),
                achievements: strings(&[
                    "Led the migration of a legacy monolith to microservices, reducing deployment time by 75%",
                    "Improved application performance by 60% through caching strategies",
                    "Mentored 12+ junior developers and established coding standards across 4 teams",
                ]),
                category: Some(EmploymentCategory::FullTime),
                is_visible: true,
            },
            Experience {
                id: "exp2".to_string(),
                title: "Full Stack Developer".to_string(),
                company: "Airbnb".to_string(),
                company_link: Some("https://airbnb.com".to_string()),
                period: "2019 - 2021".to_string(),
                description: "Developed and maintained user-facing features for the booking platform, \
serving millions of hosts and guests globally."
                    .to_string(),
                tech_stack: strings(&["React", "Ruby on Rails", "Node.js", "PostgreSQL", "AWS"]),
                achievements: strings(&[
                    "Implemented a new booking flow that increased conversion rates by 25%",
                    "Built a real-time messaging system handling 500K+ messages per day",
                ]),
                category: Some(EmploymentCategory::FullTime),
                is_visible: true,
            },
            Experience {
                id: "exp3".to_string(),
                title: "Software Developer".to_string(),
                company: "TechStart Solutions".to_string(),
                company_link: Some("https://techstartsolutions.com".to_string()),
                period: "2017 - 2019".to_string(),
                description: "Full-stack development for a fintech startup building investment \
portfolio management tools."
                    .to_string(),
                tech_stack: strings(&["Vue.js", "Python", "Django", "PostgreSQL", "Docker"]),
                achievements: strings(&[
                    "Built an MVP from scratch that acquired the first 1000 users within 6 months",
                    "Implemented secure payment processing with 99.9% uptime",
                ]),
                category: Some(EmploymentCategory::FullTime),
                is_visible: true,
            },
            Experience {
                id: "exp4".to_string(),
                title: "Frontend Developer (Contract)".to_string(),
                company: "Design Studio Pro".to_string(),
                company_link: None,
                period: "2016 - 2017".to_string(),
                description: "Contract work developing custom websites for design agency clients."
                    .to_string(),
                tech_stack: strings(&["JavaScript", "HTML5", "CSS3", "WordPress", "PHP"]),
                achievements: strings(&[
                    "Delivered 15+ client projects with 100% on-time completion rate",
                ]),
                category: Some(EmploymentCategory::Contract),
                is_visible: true,
            },
        ],
        education: vec![
            Education {
                degree: "Master of Science in Computer Science".to_string(),
                institution: "Stanford University".to_string(),
                year: "2016".to_string(),
                gpa: Some("3.9/4.0".to_string()),
            },
            Education {
                degree: "Bachelor of Science in Software Engineering".to_string(),
                institution: "University of Washington".to_string(),
                year: "2014".to_string(),
                gpa: Some("3.8/4.0".to_string()),
            },
        ],
    }
}
