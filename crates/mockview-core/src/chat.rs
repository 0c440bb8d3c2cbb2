//! Rule-based chat about the current question.
//!
//! The topic is detected from the question text, the user's intent from a few
//! trigger phrases, and the reply comes from a small per-domain knowledge base.

use serde::{Deserialize, Serialize};

use crate::model::Domain;

/// What the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    Explain,
    Example,
    Challenge,
    BestPractice,
    General,
}

impl ChatIntent {
    /// Classify a user message. Earlier intents win when several match.
    pub fn classify(user_input: &str) -> ChatIntent {
        let lower = user_input.to_lowercase();
        let any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if any(&["explain", "detail", "what is"]) {
            ChatIntent::Explain
        } else if any(&["example", "instance", "sample"]) {
            ChatIntent::Example
        } else if any(&["difficult", "challenge", "hard"]) {
            ChatIntent::Challenge
        } else if any(&["best practice", "tip", "advice"]) {
            ChatIntent::BestPractice
        } else {
            ChatIntent::General
        }
    }
}

/// A knowledge-base entry.
#[derive(Debug)]
pub struct Topic {
    /// Name matched (lowercase) against the question text.
    pub name: &'static str,
    pub overview: &'static [&'static str],
    pub example: Option<&'static str>,
    pub best_practices: Option<&'static str>,
}

const SOFTWARE_TOPICS: &[Topic] = &[
    Topic {
        name: "clean code",
        overview: &[
            "Clean code implementation involves several key principles:",
            "1. **Meaningful Names**: Use clear, intention-revealing names for variables, functions, and classes",
            "2. **Single Responsibility**: Each function or class should do one thing and do it well",
            "3. **DRY (Don't Repeat Yourself)**: Avoid code duplication through proper abstraction",
            "4. **SOLID Principles**: Follow Object-Oriented Design principles",
            "5. **Comments and Documentation**: Write self-documenting code with necessary comments",
            "6. **Error Handling**: Implement proper exception handling and validation",
            "7. **Unit Testing**: Write comprehensive tests for your code",
        ],
        example: Some(
            "Here's a practical example of clean code:\n\n\
             ```rust\n\
             // Unclear\n\
             fn p(x: f64, y: f64) -> f64 { x + y }\n\n\
             // Clean\n\
             /// Add two numbers and return their sum.\n\
             fn add_numbers(first: f64, second: f64) -> f64 {\n    first + second\n}\n\
             ```",
        ),
        best_practices: Some(
            "Clean Code Best Practices:\n\
             1. Write self-documenting code\n\
             2. Follow SOLID principles\n\
             3. Keep functions small and focused\n\
             4. Use meaningful names\n\
             5. Write tests first (TDD)\n\
             6. Regular code reviews\n\
             7. Continuous refactoring",
        ),
    },
    Topic {
        name: "architecture",
        overview: &[
            "Software architecture best practices include:",
            "1. **Layered Architecture**: Separate concerns into presentation, business, and data layers",
            "2. **Microservices**: Break down complex applications into manageable services",
            "3. **API Design**: Create clear, consistent, and well-documented APIs",
            "4. **Scalability**: Design for horizontal and vertical scaling",
            "5. **Security**: Implement security at every layer",
        ],
        example: None,
        best_practices: None,
    },
    Topic {
        name: "testing",
        overview: &[
            "Effective testing strategies include:",
            "1. **Unit Testing**: Test individual components in isolation",
            "2. **Integration Testing**: Test component interactions",
            "3. **End-to-End Testing**: Test complete user workflows",
            "4. **Test-Driven Development (TDD)**: Write tests before implementation",
            "5. **Continuous Integration**: Automate testing in your pipeline",
        ],
        example: None,
        best_practices: None,
    },
];

const DATA_TOPICS: &[Topic] = &[
    Topic {
        name: "machine learning",
        overview: &[
            "Key machine learning concepts:",
            "1. **Feature Engineering**: Create relevant features from raw data",
            "2. **Model Selection**: Choose appropriate algorithms for your problem",
            "3. **Cross-Validation**: Ensure model generalization",
            "4. **Hyperparameter Tuning**: Optimize model parameters",
            "5. **Model Evaluation**: Use appropriate metrics for assessment",
        ],
        example: Some(
            "Here's a practical example of a machine learning pipeline:\n\n\
             ```python\n\
             # Data preprocessing\n\
             X_train = preprocess_data(raw_data)\n\
             # Feature engineering\n\
             features = create_features(X_train)\n\
             # Model training\n\
             model = RandomForestClassifier()\n\
             model.fit(features, y_train)\n\
             ```",
        ),
        best_practices: Some(
            "ML Best Practices:\n\
             1. Start simple, then iterate\n\
             2. Cross-validate everything\n\
             3. Handle data leakage\n\
             4. Version control your data\n\
             5. Document assumptions\n\
             6. Monitor model performance",
        ),
    },
    Topic {
        name: "data analysis",
        overview: &[
            "Data analysis best practices:",
            "1. **Data Cleaning**: Handle missing values and outliers",
            "2. **Exploratory Analysis**: Understand data distributions and relationships",
            "3. **Statistical Testing**: Apply appropriate statistical methods",
            "4. **Visualization**: Create informative plots and charts",
            "5. **Reporting**: Communicate findings effectively",
        ],
        example: None,
        best_practices: None,
    },
];

const MARKETING_TOPICS: &[Topic] = &[
    Topic {
        name: "digital marketing",
        overview: &[
            "Digital marketing strategies include:",
            "1. **SEO Optimization**: Improve search engine rankings",
            "2. **Content Marketing**: Create valuable, relevant content",
            "3. **Social Media**: Engage with audiences effectively",
            "4. **Email Marketing**: Build and nurture customer relationships",
            "5. **Analytics**: Track and measure campaign performance",
        ],
        example: Some(
            "Example digital marketing campaign structure:\n\
             1. Goal: Increase website traffic by 50%\n\
             2. Strategy: Content marketing + SEO\n\
             3. Tactics:\n   - Weekly blog posts\n   - Social media sharing\n   - Email newsletter\n\
             4. Metrics: Traffic, engagement, conversions",
        ),
        best_practices: Some(
            "Digital Marketing Best Practices:\n\
             1. Know your audience\n\
             2. Test and measure everything\n\
             3. Focus on mobile-first\n\
             4. Create valuable content\n\
             5. Optimize for conversion",
        ),
    },
    Topic {
        name: "brand management",
        overview: &[
            "Brand management principles:",
            "1. **Brand Identity**: Develop consistent brand elements",
            "2. **Positioning**: Create unique market positioning",
            "3. **Customer Experience**: Ensure consistent brand experience",
            "4. **Brand Monitoring**: Track brand perception and mentions",
            "5. **Crisis Management**: Handle brand-related issues",
        ],
        example: None,
        best_practices: None,
    },
];

/// Knowledge base for a domain.
pub fn knowledge_base(domain: Domain) -> &'static [Topic] {
    match domain {
        Domain::SoftwareDevelopment => SOFTWARE_TOPICS,
        Domain::DataScience => DATA_TOPICS,
        Domain::Marketing => MARKETING_TOPICS,
    }
}

/// First knowledge-base topic named in the question.
pub fn detect_topic(current_question: &str, domain: Domain) -> Option<&'static Topic> {
    let lower = current_question.to_lowercase();
    knowledge_base(domain)
        .iter()
        .find(|t| lower.contains(t.name))
}

fn generic_example(domain: Domain) -> &'static str {
    match domain {
        Domain::SoftwareDevelopment => "A good example would be how clean code principles apply in a large-scale project. Consider how naming conventions, modularity, and testing impact maintainability and collaboration.",
        Domain::DataScience => "For instance, when building a machine learning model, you need to consider data preprocessing, feature selection, model choice, and evaluation metrics appropriate for your specific problem.",
        Domain::Marketing => "For example, in a marketing campaign, you would analyze your target audience, set measurable goals, select appropriate channels, create compelling content, and track your results.",
    }
}

fn generic_best_practices(domain: Domain) -> &'static str {
    match domain {
        Domain::SoftwareDevelopment => "Some best practices include: writing self-documenting code, following SOLID principles, implementing continuous integration, conducting code reviews, and writing comprehensive tests.",
        Domain::DataScience => "Key best practices include: thoroughly understanding your data before modeling, validating properly to avoid leakage, starting with simple models, and documenting your assumptions and process.",
        Domain::Marketing => "Important best practices include: defining clear objectives, understanding your audience, testing different approaches, measuring results, and continuously improving based on feedback.",
    }
}

/// Reply to a chat message about the current question.
pub fn chat_response(user_input: &str, current_question: &str, domain: Domain) -> String {
    let topic = detect_topic(current_question, domain);
    let intent = ChatIntent::classify(user_input);
    tracing::debug!(?intent, topic = topic.map(|t| t.name), "chat reply");

    match intent {
        ChatIntent::Explain => match topic {
            Some(t) => t.overview.join("\n"),
            None => format!(
                "The concept in this question relates to core principles in {domain}. The key point to understand is how this applies in real-world scenarios and what best practices are recommended by industry experts."
            ),
        },
        ChatIntent::Example => topic
            .and_then(|t| t.example)
            .unwrap_or_else(|| generic_example(domain))
            .to_string(),
        ChatIntent::Challenge => format!(
            "The challenging part of this topic is balancing theoretical knowledge with practical implementation. In {domain}, you often need to adapt best practices to specific contexts while considering constraints like time, resources, and team expertise."
        ),
        ChatIntent::BestPractice => topic
            .and_then(|t| t.best_practices)
            .unwrap_or_else(|| generic_best_practices(domain))
            .to_string(),
        ChatIntent::General => format!(
            "That's an interesting aspect of the question. To answer well, consider both theoretical foundations and practical applications in {domain}. Industry experience suggests focusing on real-world implications and current best practices."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_classification() {
        assert_eq!(ChatIntent::classify("Can you explain this?"), ChatIntent::Explain);
        assert_eq!(ChatIntent::classify("What is SEO?"), ChatIntent::Explain);
        assert_eq!(ChatIntent::classify("Give me an example"), ChatIntent::Example);
        assert_eq!(ChatIntent::classify("Why is this so hard?"), ChatIntent::Challenge);
        assert_eq!(ChatIntent::classify("Any tips?"), ChatIntent::BestPractice);
        assert_eq!(ChatIntent::classify("Thanks!"), ChatIntent::General);
    }

    #[test]
    fn explain_known_topic_uses_knowledge_base() {
        let reply = chat_response(
            "Please explain",
            "What are the best practices for clean code principles in modern software development?",
            Domain::SoftwareDevelopment,
        );
        assert!(reply.starts_with("Clean code implementation"));
        assert!(reply.contains("Single Responsibility"));
    }

    #[test]
    fn example_falls_back_to_domain_text() {
        let reply = chat_response(
            "Show me an example",
            "How does brand management help in reaching target audiences?",
            Domain::Marketing,
        );
        assert!(reply.starts_with("For example, in a marketing campaign"));
    }

    #[test]
    fn best_practice_for_known_topic() {
        let reply = chat_response(
            "any advice?",
            "What are the advantages and limitations of using machine learning?",
            Domain::DataScience,
        );
        assert!(reply.starts_with("ML Best Practices"));
    }

    #[test]
    fn replies_are_never_empty() {
        for domain in Domain::ALL {
            for input in ["explain", "example", "hard", "tip", "hello"] {
                assert!(!chat_response(input, "unrelated question", domain).is_empty());
            }
        }
    }

    #[test]
    fn general_reply_names_domain() {
        let reply = chat_response("hmm", "anything", Domain::DataScience);
        assert!(reply.contains("Data Science"));
    }
}
