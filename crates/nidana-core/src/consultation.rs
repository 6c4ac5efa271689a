//! The consultation flow: intake → confirm → predict → remedies.
//!
//! Each step reads what the previous step stored in the `SymptomStore` and
//! writes its own output back, so the steps can run in separate processes
//! (or screens) as long as they share a store:
//!
//!   intake  ── userSymptoms ──▶ confirm ── finalSymptoms ──▶ predict
//!
//! A step whose input is missing or unreadable returns
//! `SymptomsMissing`/`SessionCorrupt`; the caller's answer to both is to send
//! the user back to intake.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nidana_contracts::{
    error::{NidanaError, NidanaResult},
    MatchResult, RemedySheet, SymptomSet,
};

use crate::traits::{ConditionMatcher, RemedyCatalog, SymptomStore, SymptomSuggester};

/// Store key for the symptoms entered at intake.
pub const USER_SYMPTOMS_KEY: &str = "userSymptoms";

/// Store key for the confirmed symptoms handed to the matcher.
pub const FINAL_SYMPTOMS_KEY: &str = "finalSymptoms";

/// The outcome of `Consultation::predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// The symptoms that were analyzed, as stored.
    pub symptoms: Vec<String>,
    /// Ranked matches, best first. May be empty.
    pub matches: Vec<MatchResult>,
}

impl Prediction {
    /// True when no condition qualified. This is an outcome to render, not an error.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn best(&self) -> Option<&MatchResult> {
        self.matches.first()
    }
}

/// Drives one user's consultation against a shared store.
pub struct Consultation {
    store: Box<dyn SymptomStore>,
    suggester: Box<dyn SymptomSuggester>,
    matcher: Box<dyn ConditionMatcher>,
    remedies: Box<dyn RemedyCatalog>,
}

impl Consultation {
    pub fn new(
        store: Box<dyn SymptomStore>,
        suggester: Box<dyn SymptomSuggester>,
        matcher: Box<dyn ConditionMatcher>,
        remedies: Box<dyn RemedyCatalog>,
    ) -> Self {
        Self { store, suggester, matcher, remedies }
    }

    /// Record the intake set and return co-occurring suggestions for it.
    ///
    /// # Errors
    ///
    /// `NoSymptoms` if `symptoms` is empty; store failures are propagated.
    pub fn intake(&self, symptoms: &SymptomSet) -> NidanaResult<Vec<String>> {
        if symptoms.is_empty() {
            warn!("intake rejected: empty symptom set");
            return Err(NidanaError::NoSymptoms);
        }

        self.save(USER_SYMPTOMS_KEY, symptoms.as_slice())?;
        let suggestions = self.suggester.suggest(symptoms.as_slice());

        info!(
            symptoms = symptoms.len(),
            suggestions = suggestions.len(),
            "intake recorded"
        );
        Ok(suggestions)
    }

    /// Drop `symptom` from the stored intake set and return fresh suggestions.
    pub fn revise(&self, symptom: &str) -> NidanaResult<Vec<String>> {
        let mut symptoms: SymptomSet = self.load(USER_SYMPTOMS_KEY)?.into_iter().collect();

        if symptoms.remove(symptom) {
            debug!(symptom = %symptom, "removed symptom from intake set");
            self.save(USER_SYMPTOMS_KEY, symptoms.as_slice())?;
        }

        Ok(self.suggester.suggest(symptoms.as_slice()))
    }

    /// Append the accepted extra symptoms to the intake set and store the result
    /// as the final set.
    ///
    /// The stored intake symptoms keep their order and come first.
    pub fn confirm(&self, additional: &[String]) -> NidanaResult<Vec<String>> {
        let mut symptoms = self.load(USER_SYMPTOMS_KEY)?;
        symptoms.extend(additional.iter().cloned());

        self.save(FINAL_SYMPTOMS_KEY, &symptoms)?;

        info!(
            symptoms = symptoms.len(),
            additional = additional.len(),
            "final symptom set confirmed"
        );
        Ok(symptoms)
    }

    /// Rank conditions for the confirmed symptom set.
    pub fn predict(&self) -> NidanaResult<Prediction> {
        let symptoms = self.load(FINAL_SYMPTOMS_KEY)?;
        let matches = self.matcher.rank(&symptoms);

        match matches.first() {
            Some(best) => info!(
                matches = matches.len(),
                best = %best.condition_id,
                score = best.score,
                "prediction complete"
            ),
            None => info!(symptoms = symptoms.len(), "prediction found no qualifying conditions"),
        }

        Ok(Prediction { symptoms, matches })
    }

    /// The remedy sheet for a predicted condition.
    pub fn remedies(&self, condition_id: &str) -> NidanaResult<&RemedySheet> {
        self.remedies
            .lookup(condition_id)
            .ok_or_else(|| NidanaError::UnknownCondition {
                id: condition_id.to_string(),
            })
    }

    /// Forget both stored symptom sets.
    pub fn reset(&self) -> NidanaResult<()> {
        self.store.remove(USER_SYMPTOMS_KEY)?;
        self.store.remove(FINAL_SYMPTOMS_KEY)
    }

    fn load(&self, key: &str) -> NidanaResult<Vec<String>> {
        let raw = self.store.get(key)?.ok_or_else(|| {
            debug!(key = %key, "no stored symptoms");
            NidanaError::SymptomsMissing { key: key.to_string() }
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            warn!(key = %key, error = %e, "stored symptoms are corrupt");
            NidanaError::SessionCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn save(&self, key: &str, symptoms: &[String]) -> NidanaResult<()> {
        let json = serde_json::to_string(symptoms).map_err(|e| NidanaError::StoreFailed {
            reason: format!("failed to encode symptoms for '{}': {}", key, e),
        })?;
        self.store.set(key, json)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use nidana_contracts::{
        error::{NidanaError, NidanaResult},
        MatchResult, Remedy, RemedyCategory, RemedySheet, SymptomSet,
    };

    use crate::traits::{ConditionMatcher, RemedyCatalog, SymptomStore, SymptomSuggester};

    use super::{Consultation, FINAL_SYMPTOMS_KEY, USER_SYMPTOMS_KEY};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A store backed by a shared map so tests can inspect and tamper with it.
    #[derive(Clone, Default)]
    struct MockStore {
        values: Arc<Mutex<HashMap<String, String>>>,
    }

    impl SymptomStore for MockStore {
        fn get(&self, key: &str) -> NidanaResult<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: String) -> NidanaResult<()> {
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        fn remove(&self, key: &str) -> NidanaResult<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    /// Suggests "chills" for "fever" and nothing else.
    struct MockSuggester;

    impl SymptomSuggester for MockSuggester {
        fn suggest(&self, current: &[String]) -> Vec<String> {
            if current.iter().any(|s| s == "fever") && !current.iter().any(|s| s == "chills") {
                vec!["chills".to_string()]
            } else {
                vec![]
            }
        }
    }

    /// Matches "flu" with a score equal to ten times the symptom count.
    struct MockMatcher {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl ConditionMatcher for MockMatcher {
        fn rank(&self, symptoms: &[String]) -> Vec<MatchResult> {
            self.calls.lock().unwrap().push(symptoms.to_vec());
            if symptoms.is_empty() {
                return vec![];
            }
            vec![MatchResult {
                condition_id: "flu".to_string(),
                display_name: "Flu".to_string(),
                scientific_name: None,
                description: None,
                severity: Some(3),
                score: 10 * symptoms.len() as u32,
            }]
        }
    }

    struct MockRemedies {
        sheet: RemedySheet,
    }

    impl RemedyCatalog for MockRemedies {
        fn lookup(&self, condition_id: &str) -> Option<&RemedySheet> {
            (condition_id == self.sheet.id).then_some(&self.sheet)
        }

        fn ids(&self) -> Vec<&str> {
            vec![self.sheet.id.as_str()]
        }
    }

    fn flu_sheet() -> RemedySheet {
        RemedySheet {
            id: "flu".to_string(),
            name: "Flu".to_string(),
            description: "Seasonal influenza".to_string(),
            remedies: vec![Remedy {
                title: "Rest".to_string(),
                description: "Sleep it off".to_string(),
                category: RemedyCategory::Daily,
            }],
            warnings: vec![],
            when_to_see_doctor: vec![],
        }
    }

    fn consultation(store: MockStore) -> (Consultation, Arc<Mutex<Vec<Vec<String>>>>) {
        let calls = Arc::new(Mutex::new(vec![]));
        let consultation = Consultation::new(
            Box::new(store),
            Box::new(MockSuggester),
            Box::new(MockMatcher { calls: Arc::clone(&calls) }),
            Box::new(MockRemedies { sheet: flu_sheet() }),
        );
        (consultation, calls)
    }

    fn set_of(symptoms: &str) -> SymptomSet {
        let mut set = SymptomSet::new();
        set.add_free_text(symptoms);
        set
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_intake_is_rejected_and_nothing_is_stored() {
        let store = MockStore::default();
        let (consultation, _) = consultation(store.clone());

        let err = consultation.intake(&SymptomSet::new()).unwrap_err();

        assert!(matches!(err, NidanaError::NoSymptoms));
        assert!(store.values.lock().unwrap().is_empty());
    }

    #[test]
    fn intake_stores_json_array_and_returns_suggestions() {
        let store = MockStore::default();
        let (consultation, _) = consultation(store.clone());

        let suggestions = consultation.intake(&set_of("fever, cough")).unwrap();

        assert_eq!(suggestions, vec!["chills".to_string()]);
        let stored = store.values.lock().unwrap().get(USER_SYMPTOMS_KEY).cloned();
        assert_eq!(stored.as_deref(), Some(r#"["fever","cough"]"#));
    }

    #[test]
    fn full_flow_appends_additional_symptoms_after_intake() {
        let (consultation, calls) = consultation(MockStore::default());

        consultation.intake(&set_of("fever, cough")).unwrap();
        let confirmed = consultation.confirm(&["chills".to_string()]).unwrap();
        assert_eq!(confirmed, ["fever", "cough", "chills"]);

        let prediction = consultation.predict().unwrap();
        assert_eq!(prediction.symptoms, confirmed);
        assert_eq!(prediction.best().map(|m| m.score), Some(30));
        assert_eq!(calls.lock().unwrap().as_slice(), [confirmed]);
    }

    #[test]
    fn predict_without_confirm_reports_missing_symptoms() {
        let (consultation, _) = consultation(MockStore::default());
        consultation.intake(&set_of("fever")).unwrap();

        match consultation.predict() {
            Err(NidanaError::SymptomsMissing { key }) => assert_eq!(key, FINAL_SYMPTOMS_KEY),
            other => panic!("expected SymptomsMissing, got {:?}", other),
        }
    }

    #[test]
    fn confirm_without_intake_reports_missing_symptoms() {
        let (consultation, _) = consultation(MockStore::default());

        match consultation.confirm(&[]) {
            Err(NidanaError::SymptomsMissing { key }) => assert_eq!(key, USER_SYMPTOMS_KEY),
            other => panic!("expected SymptomsMissing, got {:?}", other),
        }
    }

    #[test]
    fn corrupt_stored_value_reports_session_corrupt() {
        let store = MockStore::default();
        store
            .set(FINAL_SYMPTOMS_KEY, "{not json".to_string())
            .unwrap();
        let (consultation, calls) = consultation(store);

        match consultation.predict() {
            Err(NidanaError::SessionCorrupt { key, .. }) => assert_eq!(key, FINAL_SYMPTOMS_KEY),
            other => panic!("expected SessionCorrupt, got {:?}", other),
        }
        // The matcher never sees corrupt input.
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn stored_object_instead_of_array_is_corrupt() {
        let store = MockStore::default();
        store
            .set(USER_SYMPTOMS_KEY, r#"{"fever":true}"#.to_string())
            .unwrap();
        let (consultation, _) = consultation(store);

        assert!(matches!(
            consultation.confirm(&[]),
            Err(NidanaError::SessionCorrupt { .. })
        ));
    }

    #[test]
    fn revise_removes_symptom_and_refreshes_suggestions() {
        let store = MockStore::default();
        let (consultation, _) = consultation(store.clone());
        consultation.intake(&set_of("fever, cough")).unwrap();

        let suggestions = consultation.revise("fever").unwrap();

        assert!(suggestions.is_empty());
        let stored = store.values.lock().unwrap().get(USER_SYMPTOMS_KEY).cloned();
        assert_eq!(stored.as_deref(), Some(r#"["cough"]"#));
    }

    #[test]
    fn empty_match_list_is_a_valid_prediction() {
        let store = MockStore::default();
        store.set(FINAL_SYMPTOMS_KEY, "[]".to_string()).unwrap();
        let (consultation, _) = consultation(store);

        let prediction = consultation.predict().unwrap();
        assert!(prediction.is_empty());
        assert!(prediction.best().is_none());
    }

    #[test]
    fn remedies_lookup_and_unknown_condition() {
        let (consultation, _) = consultation(MockStore::default());

        assert_eq!(consultation.remedies("flu").unwrap().name, "Flu");
        match consultation.remedies("measles") {
            Err(NidanaError::UnknownCondition { id }) => assert_eq!(id, "measles"),
            other => panic!("expected UnknownCondition, got {:?}", other),
        }
    }

    #[test]
    fn reset_clears_both_keys() {
        let store = MockStore::default();
        let (consultation, _) = consultation(store.clone());
        consultation.intake(&set_of("fever")).unwrap();
        consultation.confirm(&[]).unwrap();

        consultation.reset().unwrap();

        assert!(store.values.lock().unwrap().is_empty());
    }
}
