use crate::knowledge::{Document, DocumentMetadata};

struct Seed {
    id: &'static str,
    kind: &'static str,
    field: &'static str,
    content: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "skill-1",
        kind: "skill_trend",
        field: "Software Development",
        content: "Cloud Engineering: In-demand skills include proficiency in AWS, Azure, or GCP. \
            Core competencies involve Kubernetes for container orchestration and Terraform for \
            Infrastructure as Code (IaC).",
    },
    Seed {
        id: "skill-2",
        kind: "career_path",
        field: "Data Science",
        content: "Data Analysis career path often starts as a Data Analyst and progresses to a \
            Senior Analyst or Analytics Manager. Advancing requires strong skills in data \
            visualization tools like Tableau or Power BI.",
    },
    Seed {
        id: "skill-3",
        kind: "role_description",
        field: "Software Development",
        content: "Full-Stack Development: A Junior Full-Stack Developer should master a frontend \
            framework like React or Vue and a backend framework like Node.js/Express or Django. \
            Skill gaps often appear in system design and database optimization.",
    },
    Seed {
        id: "skill-4",
        kind: "certification",
        field: "Data Science",
        content: "Popular certifications for data roles include the Google Professional Data \
            Engineer certification and the Microsoft Certified: Azure Data Scientist Associate.",
    },
    Seed {
        id: "skill-5",
        kind: "skill_trend",
        field: "Design",
        content: "UI/UX Design: Figma is the industry-standard tool for collaborative design and \
            prototyping. Knowledge of user research methodologies and usability testing is \
            crucial for senior roles.",
    },
    Seed {
        id: "ats-1",
        kind: "ats_tip",
        field: "General",
        content: "ATS (Applicant Tracking Systems) readiness is crucial. Resumes should use \
            standard section headers like 'Professional Experience', 'Skills', and 'Education'. \
            Avoid using tables, columns, or images as they are often parsed incorrectly.",
    },
    Seed {
        id: "ats-2",
        kind: "ats_tip",
        field: "Data Science",
        content: "For maximum ATS compatibility, resumes should include specific keywords from \
            the job description. For a data analyst role, keywords like 'SQL', 'Tableau', \
            'Power BI', 'Python', 'Data Visualization', and 'Statistical Analysis' are essential.",
    },
    Seed {
        id: "ats-3",
        kind: "ats_tip",
        field: "Software Development",
        content: "For software development roles, ATS systems often scan for keywords related to \
            programming languages (e.g., 'Java', 'Python', 'JavaScript'), frameworks ('React', \
            'Spring Boot', 'Django'), and methodologies ('Agile', 'Scrum').",
    },
    Seed {
        id: "roadmap-1",
        kind: "career_roadmap",
        field: "Software Development",
        content: "A typical career growth roadmap for a software engineer is: Junior Developer \
            (0-2 years), Mid-Level Developer (2-5 years), and Senior Developer (5+ years). \
            Specializations can lead to roles like Cloud Architect, DevOps Engineer, or Tech Lead.",
    },
    Seed {
        id: "roadmap-2",
        kind: "career_roadmap",
        field: "Data Science",
        content: "The career path for data professionals often looks like this: Start as a Data \
            Analyst. Short-term growth leads to Senior Data Analyst. Long-term, with skills in \
            machine learning and statistics, one can transition to a Data Scientist or \
            Analytics Manager.",
    },
    Seed {
        id: "upskill-1",
        kind: "upskilling",
        field: "Data Science",
        content: "To advance in data analytics, learning cloud data platforms like AWS Redshift, \
            Google BigQuery, or Azure Synapse Analytics is highly recommended. A certification \
            like 'Google Professional Data Engineer' validates these skills.",
    },
    Seed {
        id: "trend-llm-integration",
        kind: "skill_trend",
        field: "Software Development",
        content: "Advanced AI Integration: Skills in integrating LLMs (like GPT, Claude, Gemini) \
            into existing applications using frameworks like LangChain or direct API calls are \
            becoming highly sought after for senior developer roles.",
    },
    Seed {
        id: "trend-finops",
        kind: "upskilling",
        field: "Software Development",
        content: "FinOps (Financial Operations) is an emerging discipline for Cloud Engineers, \
            focusing on optimizing cloud spending. Knowledge of tools like AWS Cost Explorer or \
            Azure Cost Management is a key differentiator.",
    },
];

/// The built-in market-trend documents.
pub fn seed_documents() -> Vec<Document> {
    SEEDS
        .iter()
        .map(|seed| Document {
            id: seed.id.to_string(),
            content: seed.content.to_string(),
            metadata: DocumentMetadata {
                kind: seed.kind.to_string(),
                field: seed.field.to_string(),
            },
        })
        .collect()
}
