use crate::models::TaskType;

const GENERAL: &str = "You are a helpful AI assistant. Provide clear, accurate, and helpful responses.";
// the multi-line messages keep their line break and four-space indent
const ANALYSIS: &str = "You are an analytical AI assistant. Break down problems step by step, \n    \
consider multiple perspectives, and provide thorough analysis with clear reasoning.";
const CREATIVE: &str = "You are a creative AI assistant. Think outside the box, generate unique ideas, \n    \
and provide imaginative solutions while maintaining relevance to the topic.";
const TECHNICAL: &str = "You are a technical AI assistant. Provide precise, detailed technical explanations, \n    \
include relevant code examples when appropriate, and focus on best practices.";

impl TaskType {
    pub fn system_message(&self) -> &'static str {
        match self {
            TaskType::General => GENERAL,
            TaskType::Analysis => ANALYSIS,
            TaskType::Creative => CREATIVE,
            TaskType::Technical => TECHNICAL,
        }
    }
}

// prompt with one open slot for the query, kept as a split point so braces
// in the context or query are never interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    head: String,
    tail: String,
}

impl PromptTemplate {
    pub fn render(&self, query: &str) -> String {
        let mut prompt = String::with_capacity(self.head.len() + query.len() + self.tail.len());
        prompt.push_str(&self.head);
        prompt.push_str(query);
        prompt.push_str(&self.tail);
        prompt
    }
}

impl std::fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{query}}{}", self.head, self.tail)
    }
}

pub fn resolve(task_type: TaskType, context: Option<&str>) -> PromptTemplate {
    let system = task_type.system_message();

    match context.filter(|c| !c.is_empty()) {
        Some(context) => PromptTemplate {
            head: format!(
                "System: {system}\n\nContext Information:\n{context}\n\nUser Query: "
            ),
            tail: "\n\nPlease provide a response that takes into account both the context \
                   provided and the user's query.\n"
                .to_string(),
        },
        None => PromptTemplate {
            head: format!("System: {system}\n\nUser Query: "),
            tail: "\n\nPlease provide a response based on the user's query.\n".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_resolves_like_general() {
        let unknown = resolve(TaskType::from("unknown_type"), None);
        let general = resolve(TaskType::from("general"), None);
        assert_eq!(unknown, general);
        assert_eq!(unknown.render("hi"), general.render("hi"));
    }

    #[test]
    fn context_is_embedded_in_labeled_section() {
        let prompt = resolve(TaskType::General, Some("ctx")).render("hi");
        assert!(prompt.contains("Context Information:\nctx\n"));
        assert!(prompt.contains("both the context"));

        let bare = resolve(TaskType::General, None).render("hi");
        assert!(!bare.contains("ctx"));
        assert!(!bare.contains("Context Information"));
        assert!(bare.contains("based on the user's query"));
    }

    #[test]
    fn empty_context_is_ignored() {
        assert_eq!(
            resolve(TaskType::Creative, Some("")),
            resolve(TaskType::Creative, None)
        );
    }

    #[test]
    fn rendered_prompt_layout() {
        let prompt = resolve(TaskType::Technical, None).render("What is a mutex?");
        assert_eq!(
            prompt,
            format!(
                "System: {TECHNICAL}\n\nUser Query: What is a mutex?\n\n\
                 Please provide a response based on the user's query.\n"
            )
        );
    }

    #[test]
    fn braces_in_query_and_context_are_literal() {
        let prompt = resolve(TaskType::General, Some("{query}")).render("{context}");
        assert!(prompt.contains("Context Information:\n{query}\n"));
        assert!(prompt.contains("User Query: {context}\n"));
    }

    #[test]
    fn each_task_type_has_its_own_system_message() {
        let messages = [
            TaskType::General,
            TaskType::Analysis,
            TaskType::Creative,
            TaskType::Technical,
        ]
        .map(|t| t.system_message());
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let prompt = resolve(TaskType::Analysis, None).render("x");
        assert!(prompt.starts_with("System: You are an analytical AI assistant."));
    }

    #[test]
    fn multi_line_system_messages_keep_their_layout() {
        assert!(ANALYSIS.contains("step by step, \n    consider multiple perspectives"));
        assert!(CREATIVE.contains("unique ideas, \n    and provide"));
        assert!(TECHNICAL.contains("explanations, \n    include relevant"));
        assert!(!GENERAL.contains('\n'));

        let prompt = resolve(TaskType::Analysis, None).render("x");
        assert!(prompt.contains("step by step, \n    consider"));
    }

    #[test]
    fn display_shows_open_slot() {
        let template = resolve(TaskType::General, None).to_string();
        assert!(template.contains("User Query: {query}"));
    }
}
