//! The static career catalog with free-text search and category filtering.

use serde::Serialize;

use compass_types::career::Career;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

pub static CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Technology",
    "Design",
    "Analytics",
    "Management",
    "Marketing",
    "Security",
    "Business",
    "Creative",
    "Finance",
    "Healthcare",
    "Sales",
    "Education",
    "Engineering",
];

pub static CAREERS: &[Career] = &[
    Career {
        title: "Software Developer",
        category: "Technology",
        description: "Design, develop, and maintain software applications using various programming languages and frameworks.",
        skills: &["Programming", "Problem Solving", "Debugging", "Version Control"],
        salary_range: "$70,000 - $150,000",
        growth_rate: "22%",
        work_style: "Remote/Office",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Data Scientist",
        category: "Analytics",
        description: "Analyze complex data sets to extract insights and drive business decisions using statistical methods.",
        skills: &["Statistics", "Machine Learning", "Python/R", "Data Visualization"],
        salary_range: "$80,000 - $160,000",
        growth_rate: "31%",
        work_style: "Remote/Office",
        education: "Master's Degree",
    },
    Career {
        title: "UX/UI Designer",
        category: "Design",
        description: "Create intuitive and visually appealing user interfaces for digital products and applications.",
        skills: &["Design Thinking", "Prototyping", "User Research", "Visual Design"],
        salary_range: "$60,000 - $120,000",
        growth_rate: "13%",
        work_style: "Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Product Manager",
        category: "Management",
        description: "Lead product development from conception to launch, coordinating between teams and stakeholders.",
        skills: &["Leadership", "Strategic Planning", "Communication", "Market Analysis"],
        salary_range: "$90,000 - $180,000",
        growth_rate: "8%",
        work_style: "Office/Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Digital Marketing Specialist",
        category: "Marketing",
        description: "Develop and execute digital marketing campaigns across various online platforms and channels.",
        skills: &["SEO/SEM", "Content Marketing", "Analytics", "Social Media"],
        salary_range: "$45,000 - $85,000",
        growth_rate: "10%",
        work_style: "Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Cybersecurity Analyst",
        category: "Security",
        description: "Protect organizations from cyber threats by monitoring, detecting, and responding to security incidents.",
        skills: &["Network Security", "Threat Analysis", "Risk Assessment", "Incident Response"],
        salary_range: "$75,000 - $140,000",
        growth_rate: "35%",
        work_style: "Office/Remote",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Cloud Architect",
        category: "Technology",
        description: "Design and implement cloud computing strategies and infrastructure for organizations.",
        skills: &["Cloud Platforms", "System Architecture", "DevOps", "Security"],
        salary_range: "$120,000 - $200,000",
        growth_rate: "25%",
        work_style: "Remote/Office",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Business Analyst",
        category: "Business",
        description: "Analyze business processes and requirements to improve efficiency and drive organizational growth.",
        skills: &["Process Analysis", "Requirements Gathering", "Documentation", "Problem Solving"],
        salary_range: "$60,000 - $110,000",
        growth_rate: "14%",
        work_style: "Office/Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "DevOps Engineer",
        category: "Technology",
        description: "Bridge development and operations teams to improve software deployment and infrastructure management.",
        skills: &["CI/CD", "Docker", "Kubernetes", "Infrastructure as Code"],
        salary_range: "$85,000 - $155,000",
        growth_rate: "20%",
        work_style: "Remote/Office",
        education: "Bachelor's Degree",
    },
    Career {
        title: "AI/ML Engineer",
        category: "Technology",
        description: "Develop and deploy machine learning models and artificial intelligence systems for various applications.",
        skills: &["Machine Learning", "Deep Learning", "Python", "TensorFlow/PyTorch"],
        salary_range: "$100,000 - $180,000",
        growth_rate: "40%",
        work_style: "Remote/Office",
        education: "Master's Degree",
    },
    Career {
        title: "Content Creator",
        category: "Creative",
        description: "Create engaging content across various platforms including video, written, and visual content.",
        skills: &["Content Writing", "Video Editing", "Social Media", "SEO"],
        salary_range: "$35,000 - $75,000",
        growth_rate: "15%",
        work_style: "Remote/Freelance",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Financial Analyst",
        category: "Finance",
        description: "Analyze financial data and market trends to provide investment recommendations and business insights.",
        skills: &["Financial Modeling", "Excel", "Data Analysis", "Risk Assessment"],
        salary_range: "$55,000 - $95,000",
        growth_rate: "6%",
        work_style: "Office/Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Nurse Practitioner",
        category: "Healthcare",
        description: "Provide advanced nursing care, diagnose conditions, and prescribe treatments in various healthcare settings.",
        skills: &["Clinical Skills", "Patient Care", "Diagnosis", "Treatment Planning"],
        salary_range: "$95,000 - $130,000",
        growth_rate: "45%",
        work_style: "On-site",
        education: "Master's Degree",
    },
    Career {
        title: "Sales Manager",
        category: "Sales",
        description: "Lead sales teams, develop strategies, and manage client relationships to drive revenue growth.",
        skills: &["Leadership", "Sales Strategy", "CRM", "Negotiation"],
        salary_range: "$65,000 - $125,000",
        growth_rate: "7%",
        work_style: "Office/Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Graphic Designer",
        category: "Design",
        description: "Create visual concepts and designs for print and digital media to communicate ideas effectively.",
        skills: &["Adobe Creative Suite", "Typography", "Branding", "Layout Design"],
        salary_range: "$40,000 - $70,000",
        growth_rate: "3%",
        work_style: "Remote/Office",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Project Manager",
        category: "Management",
        description: "Plan, execute, and oversee projects from initiation to completion while managing resources and timelines.",
        skills: &["Project Planning", "Risk Management", "Communication", "Agile/Scrum"],
        salary_range: "$70,000 - $120,000",
        growth_rate: "11%",
        work_style: "Office/Hybrid",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Teacher",
        category: "Education",
        description: "Educate and inspire students in various subjects while developing curriculum and assessment methods.",
        skills: &["Curriculum Development", "Classroom Management", "Communication", "Subject Expertise"],
        salary_range: "$40,000 - $65,000",
        growth_rate: "8%",
        work_style: "On-site",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Physical Therapist",
        category: "Healthcare",
        description: "Help patients recover from injuries and improve mobility through therapeutic exercises and treatments.",
        skills: &["Anatomy Knowledge", "Treatment Planning", "Patient Care", "Rehabilitation"],
        salary_range: "$75,000 - $95,000",
        growth_rate: "18%",
        work_style: "On-site",
        education: "Doctoral Degree",
    },
    Career {
        title: "Social Media Manager",
        category: "Marketing",
        description: "Develop and implement social media strategies to build brand awareness and engage with audiences.",
        skills: &["Social Media Strategy", "Content Creation", "Analytics", "Community Management"],
        salary_range: "$45,000 - $75,000",
        growth_rate: "12%",
        work_style: "Remote/Office",
        education: "Bachelor's Degree",
    },
    Career {
        title: "Mechanical Engineer",
        category: "Engineering",
        description: "Design, develop, and test mechanical devices and systems for various industries and applications.",
        skills: &["CAD Software", "Problem Solving", "Mathematics", "Materials Science"],
        salary_range: "$65,000 - $105,000",
        growth_rate: "7%",
        work_style: "Office/On-site",
        education: "Bachelor's Degree",
    },];

/// Result of a catalog search.
#[derive(Debug, Clone, Serialize)]
pub struct CareerSearch {
    pub careers: Vec<&'static Career>,
    pub total: usize,
    pub categories: &'static [&'static str],
}

/// Filter the catalog.
///
/// `query` is matched case-insensitively against title, description and
/// skills; blank matches everything. `category` must match exactly; `All` or
/// `None` disables the filter.
pub fn search(query: Option<&str>, category: Option<&str>) -> CareerSearch {
    let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    let careers: Vec<&'static Career> = CAREERS
        .iter()
        .filter(|career| needle.is_empty() || career.matches_lowercase(&needle))
        .filter(|career| category.is_none_or(|c| career.category == c))
        .collect();

    CareerSearch {
        total: careers.len(),
        careers,
        categories: CATEGORIES,
    }
}
