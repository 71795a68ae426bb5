//! Top-k extraction: rank a probability distribution and resolve class ids
//! to display labels.

use serde::Serialize;

use crate::classifier::Distribution;

/// How many predictions a result carries at most.
pub const TOP_K: usize = 3;

/// One ranked prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Ranked predictions, best first, at most [`TOP_K`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionResult {
    entries: Vec<Prediction>,
}

impl PredictionResult {
    pub fn entries(&self) -> &[Prediction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-scoring prediction, if any.
    pub fn best(&self) -> Option<&Prediction> {
        self.entries.first()
    }
}

/// Select the `k` highest-probability classes and resolve their labels.
///
/// Positions are sorted by probability descending; exact ties keep their
/// original position order (ascending) — a deliberate, test-covered
/// contract, not an implementation accident. A class id resolves to its
/// display name when `target_classes` contains that position, and to the id
/// rendered as text otherwise.
pub fn top_k(
    dist: &Distribution,
    target_classes: Option<&[String]>,
    k: usize,
) -> PredictionResult {
    let mut order: Vec<usize> = (0..dist.len()).collect();
    // Stable sort over ascending positions: equal probabilities retain
    // ascending original order.
    order.sort_by(|&a, &b| {
        dist.probs[b]
            .partial_cmp(&dist.probs[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let entries = order
        .into_iter()
        .take(k)
        .map(|pos| {
            let class_id = dist.class_ids[pos];
            let label = resolve_label(class_id, target_classes);
            Prediction {
                label,
                score: dist.probs[pos],
            }
        })
        .collect();

    PredictionResult { entries }
}

fn resolve_label(class_id: i64, target_classes: Option<&[String]>) -> String {
    if let Some(names) = target_classes
        && let Ok(idx) = usize::try_from(class_id)
        && let Some(name) = names.get(idx)
    {
        return name.clone();
    }
    class_id.to_string()
}
