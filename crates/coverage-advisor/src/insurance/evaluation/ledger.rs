use serde::Serialize;

/// Shape of a ledger's running score, fixed when the ledger is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreShape {
    Scalar,
    Items(usize),
}

/// Running score: one value for single-valued products, one per item otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    Scalar(f64),
    Items(Vec<f64>),
}

impl Score {
    fn zeroed(shape: ScoreShape) -> Self {
        match shape {
            ScoreShape::Scalar => Score::Scalar(0.0),
            ScoreShape::Items(count) => Score::Items(vec![0.0; count]),
        }
    }

    fn shift(&mut self, delta: f64) {
        match self {
            Score::Scalar(value) => *value += delta,
            Score::Items(values) => values.iter_mut().for_each(|value| *value += delta),
        }
    }
}

/// One adjustment recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEvent {
    pub label: String,
    pub delta: f64,
}

/// Per-run accumulator holding the score and every adjustment applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLedger {
    score: Score,
    events: Vec<ScoreEvent>,
}

impl ScoreLedger {
    pub fn new(shape: ScoreShape) -> Self {
        Self {
            score: Score::zeroed(shape),
            events: Vec::new(),
        }
    }

    /// Adds `delta` to every component of the score.
    pub fn add(&mut self, delta: f64, reason: &str) {
        self.score.shift(delta);
        self.record("add", reason, delta);
    }

    /// Subtracts `delta` from every component; the event keeps the positive magnitude.
    pub fn remove(&mut self, delta: f64, reason: &str) {
        self.score.shift(-delta);
        self.record("remove", reason, delta);
    }

    /// Adds `delta` to a single item component.
    ///
    /// # Panics
    ///
    /// Panics when the ledger holds a scalar score or `index` is out of range.
    pub fn add_to_item(&mut self, delta: f64, reason: &str, index: usize) {
        match &mut self.score {
            Score::Items(values) => {
                let count = values.len();
                let Some(value) = values.get_mut(index) else {
                    panic!("invalid ledger shape: item {index} requested from {count} items");
                };
                *value += delta;
            }
            Score::Scalar(_) => {
                panic!("invalid ledger shape: per-item adjustment '{reason}' on a scalar score")
            }
        }
        self.record("add", reason, delta);
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn events(&self) -> &[ScoreEvent] {
        &self.events
    }

    /// Events whose full label (`"add:<reason>"` / `"remove:<reason>"`) equals `label`.
    pub fn events_for<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a ScoreEvent> + Clone + 'a {
        self.events.iter().filter(move |event| event.label == label)
    }

    fn record(&mut self, action: &str, reason: &str, delta: f64) {
        self.events.push(ScoreEvent {
            label: format!("{action}:{reason}"),
            delta,
        });
    }
}
