//! Compliance guard. Classifies the user query and injects the matching
//! directive into the outbound system prompt before it reaches the model.

use serde::{Deserialize, Serialize};

use crate::audit::ComplianceAuditEntry;
use crate::classification::{ClassificationResult, IntentClassifier};
use crate::instruction::{build_instruction, disclaimer};

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,   // "system" | "user" | "assistant"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub session_id: Option<String>,
}

// ── Policy ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardPolicy {
    /// If false, classify and audit only; prompts are passed through untouched.
    pub enforce: bool,
    /// If true, every guarded call produces an audit entry.
    pub audit: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            enforce: true,
            audit: true,
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GuardedPrompt {
    pub system_prompt: String,
    pub classification: ClassificationResult,
    /// Drives the UI disclaimer banner.
    pub show_disclaimer: bool,
    pub disclaimer: Option<&'static str>,
    pub audit: Option<ComplianceAuditEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardedRequest {
    pub request: ChatRequest,
    pub classification: ClassificationResult,
    pub show_disclaimer: bool,
    pub disclaimer: Option<&'static str>,
    pub audit: Option<ComplianceAuditEntry>,
}

// ── Guard ─────────────────────────────────────────────────────────────────────

pub struct ComplianceGuard {
    classifier: IntentClassifier,
    policy: GuardPolicy,
}

impl ComplianceGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self::with_classifier(IntentClassifier::default(), policy)
    }

    pub fn with_classifier(classifier: IntentClassifier, policy: GuardPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Classify `user_input` and merge the directive into `system_prompt`.
    pub fn guard(&self, system_prompt: &str, user_input: &str) -> GuardedPrompt {
        let (classification, audit) = self.inspect(user_input, None);

        let system_prompt = match self.directive_for(&classification) {
            Some(directive) => append_directive(system_prompt, directive),
            None => system_prompt.to_string(),
        };

        GuardedPrompt {
            system_prompt,
            show_disclaimer: classification.triggered,
            disclaimer: disclaimer(classification.category),
            classification,
            audit,
        }
    }

    /// Guard a chat request: the last user message is classified and the
    /// directive is appended to the first system message (inserted if absent).
    pub fn guard_request(&self, mut request: ChatRequest) -> GuardedRequest {
        let Some(user_input) = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
        else {
            tracing::debug!("No user message in request, passing through");
            return GuardedRequest {
                request,
                classification: ClassificationResult::info(),
                show_disclaimer: false,
                disclaimer: None,
                audit: None,
            };
        };

        let (classification, audit) = self.inspect(&user_input, request.session_id.clone());

        if let Some(directive) = self.directive_for(&classification) {
            match request.messages.iter().position(|m| m.role == "system") {
                Some(idx) => {
                    let system = &mut request.messages[idx];
                    system.content = append_directive(&system.content, directive);
                }
                None => request.messages.insert(0, Message::system(directive)),
            }
        }

        GuardedRequest {
            request,
            show_disclaimer: classification.triggered,
            disclaimer: disclaimer(classification.category),
            classification,
            audit,
        }
    }

    fn inspect(
        &self,
        user_input: &str,
        session_id: Option<String>,
    ) -> (ClassificationResult, Option<ComplianceAuditEntry>) {
        let classification = self.classifier.classify(user_input);

        tracing::info!(
            category = classification.category.as_str(),
            triggered = classification.triggered,
            pattern = classification.matched_pattern.as_deref().unwrap_or_default(),
            enforced = self.policy.enforce,
            "Compliance check"
        );

        let audit = self.policy.audit.then(|| {
            ComplianceAuditEntry::new(session_id, user_input, &classification, self.policy.enforce)
        });
        (classification, audit)
    }

    fn directive_for(&self, classification: &ClassificationResult) -> Option<&'static str> {
        if !self.policy.enforce {
            if classification.triggered {
                tracing::warn!(
                    category = classification.category.as_str(),
                    "Observe-only mode: compliance directive not injected"
                );
            }
            return None;
        }
        build_instruction(classification.category)
    }
}

/// Append `directive` after `prompt`, separated by a blank line.
pub fn append_directive(prompt: &str, directive: &str) -> String {
    let prompt = prompt.trim_end();
    if prompt.is_empty() {
        directive.to_string()
    } else {
        format!("{prompt}\n\n{directive}")
    }
}
