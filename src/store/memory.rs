//! In-memory FAQ store with an optional JSON mirror.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::core::data::{now_timestamp, Faq, FaqInput, ListFilter};
use crate::core::traits::FaqRepository;
use crate::sync::JsonSync;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug)]
pub struct MemoryStore {
    records: Vec<Faq>,
    next_id: i64,
    mirror: Option<JsonSync>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Build the store from loaded records. Text fields are trimmed and
    /// categories uppercased; invalid records and repeated ids or
    /// questions are dropped with a warning, keeping the first seen.
    pub fn from_records(records: Vec<Faq>) -> Self {
        // Ids of dropped records are not handed out again either
        let next_id = records.iter().map(|f| f.id).max().unwrap_or(0) + 1;

        let mut ids = HashSet::new();
        let mut questions = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for faq in records {
            let input = FaqInput::from(&faq).normalized();
            if let Err(e) = input.validate() {
                warn!(id = faq.id, "dropping invalid faq from loaded records: {}", e);
                continue;
            }
            if !ids.insert(faq.id) {
                warn!(id = faq.id, "dropping faq with repeated id from loaded records");
                continue;
            }
            if !questions.insert(input.question.clone()) {
                warn!(id = faq.id, "dropping faq with repeated question from loaded records");
                continue;
            }
            kept.push(Faq {
                id: faq.id,
                question: input.question,
                answer: input.answer,
                active: faq.active,
                updated_at: faq.updated_at,
                category: input.category,
            });
        }

        Self {
            records: kept,
            next_id,
            mirror: None,
        }
    }

    /// Load the collection from the mirror file and keep it in step
    /// after every mutation
    pub fn with_mirror(mirror: JsonSync) -> Self {
        let mut store = Self::from_records(mirror.import());
        store.mirror = Some(mirror);
        store
    }

    pub fn records(&self) -> &[Faq] {
        &self.records
    }

    fn persist(&self) {
        if let Some(mirror) = &self.mirror {
            // Failures are logged by the mirror; the in-memory change stands
            mirror.export(&self.records);
        }
    }

    fn ensure_unique_question(&self, question: &str, except: Option<i64>) -> AppResult<()> {
        let taken = self
            .records
            .iter()
            .any(|f| f.question == question && Some(f.id) != except);
        if taken {
            return Err(AppError::Duplicate(format!("question already exists: {}", question)));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FaqRepository for MemoryStore {
    fn add(&mut self, input: &FaqInput) -> AppResult<i64> {
        self.ensure_unique_question(&input.question, None)?;

        let id = self.next_id;
        self.next_id += 1;
        self.records.push(Faq {
            id,
            question: input.question.clone(),
            answer: input.answer.clone(),
            active: input.is_active(),
            updated_at: now_timestamp(),
            category: input.category.clone(),
        });
        debug!(id, "faq added in memory");
        self.persist();
        Ok(id)
    }

    fn list(&self, filter: &ListFilter) -> AppResult<Vec<Faq>> {
        Ok(filter.apply(&self.records))
    }

    fn update(&mut self, id: i64, input: &FaqInput) -> AppResult<bool> {
        let Some(pos) = self.records.iter().position(|f| f.id == id) else {
            return Ok(false);
        };
        self.ensure_unique_question(&input.question, Some(id))?;

        let faq = &mut self.records[pos];
        faq.question = input.question.clone();
        faq.answer = input.answer.clone();
        faq.active = input.is_active();
        faq.category = input.category.clone();
        faq.updated_at = now_timestamp();
        self.persist();
        Ok(true)
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        let before = self.records.len();
        self.records.retain(|f| f.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Faq>> {
        Ok(self.records.iter().find(|f| f.id == id).cloned())
    }

    fn list_categories(&self) -> AppResult<Vec<String>> {
        let mut categories: Vec<String> = self.records.iter().map(|f| f.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(question: &str, category: &str) -> FaqInput {
        FaqInput::new(question, "Answer", 1, category)
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let mut store = MemoryStore::new();
        assert_eq!(store.add(&input("One", "GERAL")).unwrap(), 1);
        assert_eq!(store.add(&input("Two", "GERAL")).unwrap(), 2);

        assert!(store.delete(2).unwrap());
        assert_eq!(store.add(&input("Three", "GERAL")).unwrap(), 3);
    }

    #[test]
    fn test_ids_continue_after_loaded_records() {
        let mut seed = MemoryStore::new();
        seed.add(&input("One", "GERAL")).unwrap();
        seed.add(&input("Two", "GERAL")).unwrap();
        seed.delete(1).unwrap();

        let mut store = MemoryStore::from_records(seed.records().to_vec());
        assert_eq!(store.add(&input("Three", "GERAL")).unwrap(), 3);
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let mut store = MemoryStore::new();
        store.add(&input("Same", "GERAL")).unwrap();
        assert!(matches!(store.add(&input("Same", "AGENDA")), Err(AppError::Duplicate(_))));
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_update_keeps_own_question_and_rejects_others() {
        let mut store = MemoryStore::new();
        let one = store.add(&input("One", "GERAL")).unwrap();
        let two = store.add(&input("Two", "GERAL")).unwrap();

        assert!(store.update(one, &FaqInput::new("One", "Changed", 0, "GERAL")).unwrap());
        let err = store.update(two, &input("One", "GERAL")).unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));

        let faq = store.find_by_id(one).unwrap().unwrap();
        assert_eq!(faq.answer, "Changed");
        assert!(!faq.active);
    }

    #[test]
    fn test_update_and_delete_missing_id() {
        let mut store = MemoryStore::new();
        assert!(!store.update(9, &input("Nope", "GERAL")).unwrap());
        assert!(!store.delete(9).unwrap());
        assert!(store.find_by_id(9).unwrap().is_none());
    }

    #[test]
    fn test_categories_distinct_sorted() {
        let mut store = MemoryStore::new();
        store.add(&input("One", "GERAL")).unwrap();
        store.add(&input("Two", "AGENDA")).unwrap();
        store.add(&input("Three", "GERAL")).unwrap();
        assert_eq!(store.list_categories().unwrap(), vec!["AGENDA", "GERAL"]);
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut store = MemoryStore::new();
        let id = store.add(&input("Clock", "GERAL")).unwrap();
        let before = store.find_by_id(id).unwrap().unwrap().updated_at;

        assert!(store.update(id, &FaqInput::new("Clock", "Later", 1, "GERAL")).unwrap());
        let after = store.find_by_id(id).unwrap().unwrap().updated_at;
        assert!(after >= before);
    }

    #[test]
    fn test_legacy_file_is_normalized_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq_export.json");
        std::fs::write(
            &path,
            r#"[
  {"id_faq": 1, "pergunta": " Qual o horário? ", "resposta": "8h-18h", "ativo": 1,
   "atualizado_em": "2024-05-01 10:00:00", "categoria": "geral"},
  {"id_faq": 2, "pergunta": "Onde fica?", "resposta": "Centro", "ativo": 0,
   "atualizado_em": "2024-05-02 10:00:00", "categoria": "GERAL"},
  {"id_faq": 3, "pergunta": "Qual o horário?", "resposta": "repetida", "ativo": 1,
   "atualizado_em": "2024-05-03 10:00:00", "categoria": "agenda"},
  {"id_faq": 4, "pergunta": "Sem resposta", "resposta": "  ", "ativo": 1,
   "atualizado_em": "2024-05-04 10:00:00", "categoria": "agenda"}
]"#,
        )
        .unwrap();

        let mut store = MemoryStore::with_mirror(JsonSync::new(&path));
        assert_eq!(store.list_categories().unwrap(), vec!["GERAL"]);

        let stored: Vec<(i64, &str)> = store
            .records()
            .iter()
            .map(|f| (f.id, f.question.as_str()))
            .collect();
        assert_eq!(stored, vec![(1, "Qual o horário?"), (2, "Onde fica?")]);
        assert!(!store.find_by_id(2).unwrap().unwrap().active);

        // Dropped ids are not reused
        assert_eq!(store.add(&input("Nova", "GERAL")).unwrap(), 5);
    }

    #[test]
    fn test_mirror_follows_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = JsonSync::new(dir.path().join("faq_export.json"));

        let mut store = MemoryStore::with_mirror(mirror.clone());
        let id = store.add(&input("Persisted", "GERAL")).unwrap();
        assert_eq!(mirror.import().len(), 1);

        store.update(id, &FaqInput::new("Persisted", "Edited", 1, "GERAL")).unwrap();
        assert_eq!(mirror.import()[0].answer, "Edited");

        let reloaded = MemoryStore::with_mirror(mirror.clone());
        assert_eq!(reloaded.records(), store.records());

        store.delete(id).unwrap();
        assert!(mirror.import().is_empty());
    }
}
