use std::fs;

use kbqa_nlu::{
    config::Settings,
    nlp::{
        self,
        segment::{strip_punctuation, JiebaSegmenter, Segmenter},
        vocab::{Category, Intent, Vocabulary},
    },
};
use tempfile::TempDir;

#[test]
fn ascii_punctuation_is_dropped_and_fullwidth_marks_become_spaces() {
    assert_eq!(strip_punctuation("a.b,c！d（e）"), "abc d（e）");
    assert_eq!(strip_punctuation("感冒，发烧。"), "感冒 发烧");
    assert_eq!(strip_punctuation("【头痛】‘咳嗽’；发烧：怎么办？"), "头痛  咳嗽  发烧 怎么办");
    assert_eq!(strip_punctuation("肚子痛、头痛!?"), "肚子痛 头痛");
}

#[test]
fn vocabulary_terms_survive_segmentation_whole() {
    let vocab = Vocabulary::from_entries([
        (Category::Disease, vec!["感冒发烧"]),
        (Category::Symptom, vec!["肚子痛"]),
    ]);
    let segmenter = JiebaSegmenter::new(&vocab, None).unwrap();
    let tokens = segmenter.cut("我肚子痛怎么办");
    assert!(tokens.iter().any(|t| t == "肚子痛"), "{tokens:?}");
    let tokens = segmenter.cut("感冒发烧吃什么药");
    assert!(tokens.iter().any(|t| t == "感冒发烧"), "{tokens:?}");
}

#[test]
fn user_dictionary_must_exist() {
    let vocab = Vocabulary::from_entries([(Category::Symptom, vec!["肚子痛"])]);
    let dir = TempDir::new().unwrap();
    assert!(JiebaSegmenter::new(&vocab, Some(&dir.path().join("missing.txt"))).is_err());
}

#[test]
fn colloquial_symptom_is_linked_end_to_end() {
    let dir = TempDir::new().unwrap();
    for (name, body) in [
        ("disease_vocab.txt", "感冒\n"),
        ("alias_vocab.txt", "伤风\n"),
        ("symptom_vocab.txt", "肚子痛\n"),
        ("complications_vocab.txt", "心肌炎\n"),
        ("stop_words.utf8", "该\n怎么办\n"),
    ] {
        fs::write(dir.path().join(name), body).unwrap();
    }
    let extractor = nlp::load_extractor(&Settings::with_data_dir(dir.path())).unwrap();
    let result = extractor.extract("肚子一直痛该怎么办").unwrap();
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[&Category::Symptom], vec!["肚子痛"]);
    assert_eq!(result.intentions, vec![Intent::QueryCureway]);
}
