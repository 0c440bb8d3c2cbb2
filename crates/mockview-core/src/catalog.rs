//! Static question bank and concept vocabularies.
//!
//! Templates use `{concept}` and, for comparison questions,
//! `{related_concept}` placeholders.

use crate::model::{Difficulty, Domain};

pub const CONCEPT_PLACEHOLDER: &str = "{concept}";
pub const RELATED_PLACEHOLDER: &str = "{related_concept}";

/// Question templates for a domain and difficulty.
pub fn templates(domain: Domain, difficulty: Difficulty) -> &'static [&'static str] {
    use Difficulty::*;
    use Domain::*;

    match (domain, difficulty) {
        (SoftwareDevelopment, Beginner) => &[
            "What is the purpose of {concept} in software development?",
            "Explain the concept of {concept} and its basic applications.",
            "How would you describe {concept} to a junior developer?",
            "What are the key benefits of using {concept}?",
            "What is the difference between {concept} and {related_concept}?",
        ],
        (SoftwareDevelopment, Intermediate) => &[
            "How would you implement {concept} in a real-world project? Provide specific examples.",
            "What are the best practices for {concept} in modern software development?",
            "Explain how {concept} contributes to code quality and maintainability.",
            "What challenges might you face when implementing {concept} and how would you address them?",
            "How has {concept} evolved in recent years, and what are current trends?",
        ],
        (SoftwareDevelopment, Advanced) => &[
            "Design a system that leverages {concept} for a high-scale application.",
            "Compare and contrast different approaches to implementing {concept} in enterprise systems.",
            "How would you optimize {concept} for performance in a resource-constrained environment?",
            "Discuss the trade-offs between {concept} and {related_concept} in complex systems.",
            "How would you approach refactoring a legacy system to incorporate {concept}?",
        ],
        (DataScience, Beginner) => &[
            "What is the purpose of {concept} in data science?",
            "Explain the concept of {concept} and its basic applications in data analysis.",
            "What kind of problems can {concept} help solve?",
            "What are the key benefits of using {concept} for data processing?",
            "What is the difference between {concept} and {related_concept}?",
        ],
        (DataScience, Intermediate) => &[
            "How would you apply {concept} to solve a real-world data science problem?",
            "Explain the mathematical foundations of {concept} and its applications in data analysis.",
            "What are the advantages and limitations of using {concept} in machine learning?",
            "How does {concept} compare to {related_concept} in terms of performance and use cases?",
            "Describe the process of implementing {concept} in a data science project.",
        ],
        (DataScience, Advanced) => &[
            "Design a pipeline that uses {concept} for a large-scale machine learning application.",
            "How would you handle edge cases and limitations when implementing {concept}?",
            "Discuss the computational complexity of {concept} and approaches to optimization.",
            "How would you tune the parameters of {concept} for optimal performance?",
            "Describe a novel approach to extend the capabilities of {concept} for an unusual problem.",
        ],
        (Marketing, Beginner) => &[
            "What is {concept} in marketing?",
            "How does {concept} help in reaching target audiences?",
            "Explain the basic principles of {concept} in a marketing context.",
            "What are the key benefits of including {concept} in a marketing strategy?",
            "What is the difference between {concept} and {related_concept}?",
        ],
        (Marketing, Intermediate) => &[
            "How would you leverage {concept} to improve marketing campaign performance?",
            "Explain the role of {concept} in modern digital marketing strategies.",
            "What metrics would you use to measure the success of {concept} in marketing?",
            "Compare the effectiveness of {concept} versus {related_concept} in marketing.",
            "How would you implement {concept} in a marketing strategy for a new product launch?",
        ],
        (Marketing, Advanced) => &[
            "Design a comprehensive marketing strategy centered around {concept} for a competitive market.",
            "How would you integrate {concept} with other marketing approaches for maximum impact?",
            "Discuss the ROI considerations when investing in {concept} for different types of businesses.",
            "How would you adapt {concept} for international markets with cultural differences?",
            "Analyze how {concept} might evolve in the next 5 years and how marketers should prepare.",
        ],
    }
}

/// Single concepts substituted into `{concept}`-only templates.
pub fn concepts(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::SoftwareDevelopment => &[
            "microservices architecture",
            "containerization",
            "continuous integration",
            "design patterns",
            "test-driven development",
            "RESTful APIs",
            "dependency injection",
            "clean code principles",
            "version control",
            "agile methodologies",
            "functional programming",
            "object-oriented design",
            "reactive programming",
            "serverless architecture",
            "DevOps practices",
        ],
        Domain::DataScience => &[
            "feature engineering",
            "model validation",
            "deep learning",
            "dimensionality reduction",
            "ensemble methods",
            "cross-validation",
            "regularization",
            "clustering algorithms",
            "time series analysis",
            "natural language processing",
            "data preprocessing",
            "hypothesis testing",
            "reinforcement learning",
            "transfer learning",
            "explainable AI",
        ],
        Domain::Marketing => &[
            "content marketing",
            "SEO optimization",
            "social media strategy",
            "marketing automation",
            "customer segmentation",
            "brand positioning",
            "lead generation",
            "conversion optimization",
            "email marketing",
            "influencer marketing",
            "market research",
            "customer journey mapping",
            "A/B testing",
            "personalization",
            "marketing analytics",
        ],
    }
}

/// Concept pairs substituted into comparison templates.
pub fn related_pairs(domain: Domain) -> &'static [(&'static str, &'static str)] {
    match domain {
        Domain::SoftwareDevelopment => &[
            ("microservices", "monolithic architecture"),
            ("unit testing", "integration testing"),
            ("REST", "GraphQL"),
            ("Docker", "Kubernetes"),
            ("Git", "SVN"),
            ("agile", "waterfall"),
            ("frontend", "backend"),
            ("compiled languages", "interpreted languages"),
            ("statically typed", "dynamically typed"),
            ("SQL", "NoSQL"),
        ],
        Domain::DataScience => &[
            ("supervised learning", "unsupervised learning"),
            ("classification", "regression"),
            ("neural networks", "traditional ML"),
            ("PCA", "t-SNE"),
            ("random forests", "gradient boosting"),
            ("bias", "variance"),
            ("precision", "recall"),
            ("online learning", "batch learning"),
            ("parametric models", "non-parametric models"),
            ("frequentist", "Bayesian"),
        ],
        Domain::Marketing => &[
            ("organic marketing", "paid advertising"),
            ("B2B marketing", "B2C marketing"),
            ("social media", "traditional media"),
            ("content marketing", "direct marketing"),
            ("inbound marketing", "outbound marketing"),
            ("branding", "performance marketing"),
            ("customer acquisition", "customer retention"),
            ("market segmentation", "mass marketing"),
            ("digital marketing", "print marketing"),
            ("qualitative research", "quantitative research"),
        ],
    }
}

/// Keywords an evaluator looks for when judging domain relevance.
///
/// Also the default concept list for feedback when an answer mentions none.
pub fn evaluation_keywords(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::SoftwareDevelopment => &[
            "algorithms",
            "data structures",
            "design patterns",
            "clean code",
            "testing",
            "version control",
            "scalability",
            "performance",
            "security",
            "architecture",
            "framework",
            "api",
            "database",
            "deployment",
            "debugging",
            "code review",
            "documentation",
            "agile",
            "devops",
            "continuous integration",
        ],
        Domain::DataScience => &[
            "machine learning",
            "statistics",
            "data analysis",
            "visualization",
            "feature engineering",
            "model evaluation",
            "big data",
            "neural networks",
            "regression",
            "classification",
            "clustering",
            "data cleaning",
            "hypothesis testing",
            "correlation",
            "predictive modeling",
            "overfitting",
            "validation",
            "training data",
            "algorithm",
            "deep learning",
        ],
        Domain::Marketing => &[
            "market research",
            "brand awareness",
            "customer segmentation",
            "digital marketing",
            "ROI",
            "campaign analysis",
            "social media",
            "content strategy",
            "conversion",
            "lead generation",
            "customer journey",
            "target audience",
            "SEO",
            "PPC",
            "analytics",
            "email marketing",
            "A/B testing",
            "engagement",
            "brand positioning",
            "marketing funnel",
        ],
    }
}

/// Vocabulary follow-up agents pick concepts from.
pub fn follow_up_vocabulary(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::SoftwareDevelopment => &[
            "architecture",
            "design",
            "testing",
            "deployment",
            "scalability",
            "algorithm",
            "database",
            "security",
            "performance",
            "framework",
            "api",
            "code",
            "development",
            "programming",
            "software",
        ],
        Domain::DataScience => &[
            "model",
            "algorithm",
            "data",
            "analysis",
            "prediction",
            "feature",
            "training",
            "validation",
            "accuracy",
            "dataset",
            "machine learning",
            "statistics",
            "visualization",
            "preprocessing",
            "clustering",
        ],
        Domain::Marketing => &[
            "strategy",
            "campaign",
            "audience",
            "conversion",
            "engagement",
            "brand",
            "market",
            "customer",
            "social",
            "content",
            "advertising",
            "marketing",
            "sales",
            "digital",
            "analytics",
        ],
    }
}

/// Scenario phrases used to frame follow-up discussion.
pub fn scenarios(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::SoftwareDevelopment => &[
            "a high-traffic web application",
            "a distributed system",
            "a legacy code migration",
        ],
        Domain::DataScience => &[
            "a large dataset with missing values",
            "a real-time prediction system",
            "an imbalanced classification problem",
        ],
        Domain::Marketing => &[
            "a product launch campaign",
            "a brand repositioning strategy",
            "a digital marketing conversion optimization",
        ],
    }
}
