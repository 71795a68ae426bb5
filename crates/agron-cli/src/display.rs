//! Human-readable rendering of predictions and the resolved schema.

use agron_core::Schema;
use agron_infer::PredictionResult;

/// Print ranked predictions as a small table, best first.
pub fn print_predictions(result: &PredictionResult) {
    if result.is_empty() {
        println!("no classes to predict");
        return;
    }

    println!("{:<4} {:<24} {:>8}", "#", "fertilizer", "score");
    for (rank, p) in result.entries().iter().enumerate() {
        println!("{:<4} {:<24} {:>7.1}%", rank + 1, p.label, p.score * 100.0);
    }
}

/// Print the schema the form layer renders from: feature order, categorical
/// options, and numeric medians.
pub fn print_schema(schema: &Schema) {
    println!("feature columns ({}):", schema.feature_cols().len());
    for col in schema.feature_cols() {
        if schema.is_categorical(col) {
            match schema.options(col) {
                Some(opts) if !opts.is_empty() => {
                    println!("  {col} (categorical): {}", opts.join(", "));
                }
                _ => println!("  {col} (categorical): no options configured"),
            }
        } else {
            match schema.median(col) {
                Some(m) => println!("  {col} (numeric, median {m})"),
                None => println!("  {col} (numeric)"),
            }
        }
    }

    match schema.target_classes() {
        Some(classes) => println!("target classes: {}", classes.join(", ")),
        None => println!("target classes: unknown (labels will be class ids)"),
    }
}
