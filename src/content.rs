//! Static portfolio content: everything on the page that is not fetched.

#[derive(Debug, Clone)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Specialty {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Experience {
    pub title: String,
    pub period: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Education {
    pub title: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PortfolioContent {
    pub full_name: String,
    pub role: String,
    pub bio: String,
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub skills: Vec<SkillGroup>,
    pub specialties: Vec<Specialty>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub certifications: Vec<String>,
}

impl PortfolioContent {
    /// `tel:` target: only the leading plus and digits survive
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| *c == '+' || c.is_ascii_digit())
            .collect();
        format!("tel:{}", digits)
    }

    pub fn email_href(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PortfolioContent {
    fn default() -> Self {
        PortfolioContent {
            full_name: "Tushar Ranjan Pandey".to_string(),
            role: "Backend Developer".to_string(),
            bio: "I’m a backend developer, chess enthusiast, and finance geek with a love for \
                  derivatives. I design scalable systems in Java + Spring Boot where every \
                  millisecond counts. Outside of code, I’m always learning — from market \
                  strategies to new languages. I speak Hindi, English, and I’m a beginner in Spanish."
                .to_string(),
            tagline: "Microservices • Spring Boot • Kafka • Redis • Elasticsearch".to_string(),
            email: "pandeytushar359@gmail.com".to_string(),
            phone: "+91-8447819778".to_string(),
            linkedin_url: "https://www.linkedin.com/in/tushar-pandey-49aa5a215/".to_string(),
            skills: vec![
                SkillGroup {
                    title: "Programming Languages".to_string(),
                    skills: strings(&["Java", "JavaScript", "HTML/CSS", "SQL"]),
                },
                SkillGroup {
                    title: "Backend & Databases".to_string(),
                    skills: strings(&["Spring Boot", "MySQL", "MongoDB", "Redis", "Elasticsearch"]),
                },
                SkillGroup {
                    title: "Tools & Technology".to_string(),
                    skills: strings(&["Git", "Kafka", "Docker"]),
                },
                SkillGroup {
                    title: "Concepts".to_string(),
                    skills: strings(&[
                        "Microservices",
                        "REST API",
                        "JWT Authentication",
                        "Caching",
                        "Event-Driven Architecture",
                    ]),
                },
            ],
            specialties: vec![
                Specialty {
                    title: "Microservices".to_string(),
                    description: "Independent, deployable services with clear contracts and resiliency patterns."
                        .to_string(),
                },
                Specialty {
                    title: "Event-Driven Architecture".to_string(),
                    description: "Asynchronous messaging, CQRS, and streaming for responsive systems."
                        .to_string(),
                },
                Specialty {
                    title: "Cloud & Containers".to_string(),
                    description: "Docker, orchestration, and CI/CD with strong observability.".to_string(),
                },
            ],
            experience: vec![Experience {
                title: "Junior Software Developer — TravelXP".to_string(),
                period: "Jun 2023 – Aug 2023".to_string(),
                highlights: strings(&[
                    "Developed responsive frontend pages for the Android mobile app using React Native, \
                     improving UI consistency and user engagement.",
                    "Collaborated with backend teams to integrate RESTful APIs for seamless data flow \
                     between frontend and microservices.",
                ]),
            }],
            education: vec![
                Education {
                    title: "Scaler Academy — Software Development (2025)".to_string(),
                    details: Some("Modules: DSA, SQL/DBMS, LLD, HLD, Capstone Project (Backend)".to_string()),
                },
                Education {
                    title: "MDU Rohtak — BCA in Computer Science (2023)".to_string(),
                    details: None,
                },
            ],
            certifications: strings(&[
                "Data Structures & Algorithms (Scaler) | 10/2023 – 04/2024",
                "Databases & SQL (Scaler) | 05/2024 – 06/2024",
                "Low-Level Design (Scaler) | 06/2024 – 11/2024",
                "Backend/Spring Boot (Scaler) | 01/2025 – 03/2025",
                "Full Stack Web Development (AttainU) | 05/2022 – 05/2023",
            ]),
        }
    }
}
