mod common;

use std::{collections::HashMap, sync::Arc};

use kbqa_nlu::{
    cli::batch::extract_lines,
    nlp::{
        classifier::{IntentModel, LinearIntentModel, TfidfVectorizer},
        embeddings::WordVectors,
        features::TRIGGER_DIMS,
        vocab::{Category, Intent},
    },
    Extractor,
};

#[test]
fn dictionary_hits_skip_fuzzy_linking() {
    let segmenter = Arc::new(common::CountingSegmenter::default());
    let ctx = common::context_with(
        common::vocabulary(),
        segmenter.clone(),
        Arc::new(WordVectors::empty()),
    );
    let extractor = Extractor::new(ctx).unwrap();
    let result = extractor.extract("感冒有什么症状").unwrap();
    assert_eq!(result.entities[&Category::Disease], vec!["感冒"]);
    assert_eq!(result.intentions, vec![Intent::QuerySymptom]);
    assert_eq!(segmenter.calls(), 0);
}

#[test]
fn empty_dictionary_result_invokes_linker_once() {
    let segmenter = Arc::new(common::CountingSegmenter::default());
    let ctx = common::context_with(
        common::vocabulary(),
        segmenter.clone(),
        Arc::new(WordVectors::empty()),
    );
    let extractor = Extractor::new(ctx).unwrap();
    let result = extractor.extract("肚子 一直 痛 怎么办").unwrap();
    assert_eq!(segmenter.calls(), 1);
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[&Category::Symptom], vec!["肚子痛"]);
    assert_eq!(result.intentions, vec![Intent::QueryCureway]);
}

#[test]
fn unrecognised_question_gets_qa_matching() {
    let extractor = Extractor::new(common::context(common::vocabulary())).unwrap();
    let result = extractor.extract("今天 天气 如何").unwrap();
    assert!(result.entities.is_empty());
    assert_eq!(result.intentions, vec![Intent::QaMatching]);
}

#[test]
fn result_serialises_flat() {
    let extractor = Extractor::new(common::context(common::vocabulary())).unwrap();
    let result = extractor.extract("肚子 一直 痛 怎么办").unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "Symptom": ["肚子痛"], "intentions": ["query_cureway"] })
    );
}

#[test]
fn extraction_is_repeatable() {
    let extractor = Extractor::new(common::context(common::vocabulary())).unwrap();
    for question in ["感冒发烧怎么办", "肚子 一直 痛 怎么办", "你好"] {
        let first = extractor.extract(question).unwrap();
        let second = extractor.extract(question).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn statistical_prediction_leads_the_intent_list() {
    let vectorizer =
        TfidfVectorizer::new(HashMap::from([("症状".to_string(), 0)]), vec![1.0]).unwrap();
    let mut symptom_row = vec![0.0; 1 + TRIGGER_DIMS];
    symptom_row[0] = 1.0;
    let classifier = LinearIntentModel::new(
        vec![Intent::QuerySymptom, Intent::DiseaseDescribe],
        vec![symptom_row, vec![0.0; 1 + TRIGGER_DIMS]],
        vec![0.0, 0.5],
    )
    .unwrap();
    let mut ctx = common::context(common::vocabulary());
    ctx.model = Some(IntentModel::new(Arc::new(vectorizer), Arc::new(classifier)));
    let extractor = Extractor::new(ctx).unwrap();

    let result = extractor.extract("感冒 症状").unwrap();
    assert_eq!(result.intentions, vec![Intent::QuerySymptom]);

    let result = extractor.extract("感冒").unwrap();
    assert_eq!(result.intentions, vec![Intent::DiseaseDescribe]);
}

#[test]
fn extractor_is_shareable_across_threads() {
    let extractor = Arc::new(Extractor::new(common::context(common::vocabulary())).unwrap());
    let expected = extractor.extract("感冒发烧怎么办").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = Arc::clone(&extractor);
            std::thread::spawn(move || extractor.extract("感冒发烧怎么办").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn batch_lines_skip_blanks_and_keep_order() {
    let extractor = Extractor::new(common::context(common::vocabulary())).unwrap();
    let output = extract_lines(&extractor, "感冒有什么症状\n\n  \n头痛挂什么科\n").unwrap();
    assert_eq!(output.failed, 0);
    assert_eq!(output.rows.len(), 2);
    let first: serde_json::Value = serde_json::from_str(&output.rows[0]).unwrap();
    assert_eq!(first["question"], "感冒有什么症状");
    assert_eq!(first["result"]["intentions"], serde_json::json!(["query_symptom"]));
}

#[test]
fn batch_fails_when_every_question_fails() {
    let mut ctx = common::context(common::vocabulary());
    ctx.model = Some(common::model_with(Arc::new(common::FailingClassifier)));
    let extractor = Extractor::new(ctx).unwrap();
    let err = extract_lines(&extractor, "感冒\n头痛\n").unwrap_err();
    assert!(err.to_string().contains("all 2 questions failed"));
    assert_eq!(extract_lines(&extractor, "\n").unwrap().rows.len(), 0);
}
