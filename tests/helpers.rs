#![allow(dead_code)]

use std::sync::Arc;

use darkscan::{
    Classifier, Scanner,
    classifier::{BinaryModel, CountVectorizer, DecisionTree},
};

pub const URGENCY_TERMS: [&str; 8] = [
    "only", "left", "stock", "hurry", "expires", "free", "shipping", "orders",
];

/// Linear model that flags scarcity and urgency words.
pub fn urgency_classifier() -> Classifier {
    let vectorizer = CountVectorizer::from_terms(URGENCY_TERMS);
    let model = BinaryModel::Linear {
        coefficients: vec![1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0],
        intercept: -0.5,
    };
    Classifier::new(vectorizer, model).expect("valid urgency classifier")
}

/// Three-tree forest over the same vocabulary. The trees key on "left",
/// "stock" and "hurry" respectively, each falling back to "expires".
pub fn urgency_forest() -> Classifier {
    let vectorizer = CountVectorizer::from_terms(URGENCY_TERMS);
    let split_on = |feature: i64| DecisionTree {
        children_left: vec![1, 3, -1, -1, -1],
        children_right: vec![2, 4, -1, -1, -1],
        feature: vec![feature, 4, -2, -2, -2],
        threshold: vec![0.5, 0.5, -2.0, -2.0, -2.0],
        value: vec![[4.0, 4.0], [4.0, 1.0], [0.0, 3.0], [4.0, 0.0], [0.0, 1.0]],
    };
    let model = BinaryModel::Forest {
        n_features: URGENCY_TERMS.len(),
        trees: vec![split_on(1), split_on(2), split_on(3)],
    };
    Classifier::new(vectorizer, model).expect("valid urgency forest")
}

pub fn scanner() -> Scanner {
    Scanner::new(Arc::new(urgency_classifier()))
}

pub fn html_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Shop</title></head><body>{body}</body></html>"
    )
}
