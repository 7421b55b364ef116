//! Hybrid intent resolution: one statistical prediction followed by trigger rules.

use tracing::debug;

use crate::{
    error::Result,
    nlp::{
        classifier::IntentModel,
        features,
        matcher::EntityMap,
        segment::Tokenizer,
        vocab::{Category, Intent, TriggerKind},
    },
};

struct Statistical {
    tokenizer: Tokenizer,
    model: IntentModel,
}

impl Statistical {
    fn predict(&self, question: &str) -> Result<Intent> {
        let tokens = self.tokenizer.tokens(question);
        let text = self.model.vectorizer.transform(&tokens);
        let features = features::assemble(&text, question);
        self.model.classifier.predict(&features)
    }
}

/// Produces the ordered, duplicate-free intent list for a question.
pub struct IntentResolver {
    statistical: Option<Statistical>,
}

impl IntentResolver {
    /// Trigger rules and fallbacks only.
    pub fn rules_only() -> Self {
        Self { statistical: None }
    }

    /// Prepend the classifier's prediction to the rule output.
    pub fn with_model(tokenizer: Tokenizer, model: IntentModel) -> Self {
        Self {
            statistical: Some(Statistical { tokenizer, model }),
        }
    }

    pub fn has_model(&self) -> bool {
        self.statistical.is_some()
    }

    /// Never returns an empty list; `QA_matching` is the last resort.
    pub fn resolve(&self, question: &str, entities: &EntityMap) -> Result<Vec<Intent>> {
        let mut intents = Vec::new();

        if let Some(statistical) = &self.statistical {
            let predicted = statistical.predict(question)?;
            debug!(%predicted, "classifier prediction");
            intents.push(predicted);
        }

        for kind in TriggerKind::ALL {
            if kind.matches(question) && has_any(entities, kind.required_categories()) {
                push_unique(&mut intents, kind.intent());
            }
        }

        let disease_like = has_where(entities, Category::is_disease_like);
        let symptom_like = has_where(entities, Category::is_symptom_like);

        if intents.is_empty() && disease_like {
            push_unique(&mut intents, Intent::DiseaseDescribe);
        }
        if TriggerKind::Disease.matches(question) && disease_like && symptom_like {
            push_unique(&mut intents, Intent::QueryDisease);
        }
        if intents.is_empty() || !has_any(entities, &Category::ALL) {
            push_unique(&mut intents, Intent::QaMatching);
        }

        debug!(?intents, "resolved intents");
        Ok(intents)
    }
}

fn has_any(entities: &EntityMap, categories: &[Category]) -> bool {
    categories
        .iter()
        .any(|category| entities.get(category).is_some_and(|found| !found.is_empty()))
}

fn has_where(entities: &EntityMap, pred: impl Fn(&Category) -> bool) -> bool {
    entities
        .iter()
        .any(|(category, found)| pred(category) && !found.is_empty())
}

fn push_unique(intents: &mut Vec<Intent>, intent: Intent) {
    if !intents.contains(&intent) {
        intents.push(intent);
    }
}
