pub mod analyzer;
pub mod engine;
pub mod glossary;
pub mod group;
pub mod normalize;
pub mod priority;
pub mod scenarios;
pub mod translator;
pub mod types;
