use std::collections::BTreeMap;
use std::fmt::Display;

/// Counts the decisions taken by the filters since start
#[derive(Debug, Default)]
pub struct FilterStats {
    from_start: BTreeMap<Dimension, Stats>,
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Dimension {
    Dispatcher,
    Binding { index: usize, filter: String },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub messages_in: usize,
    pub suppressed: usize,
    pub forwarded: usize,
}

impl FilterStats {
    pub fn dispatcher_decision(&mut self, ignored: bool) {
        self.add(Dimension::Dispatcher, ignored);
    }

    /// Count the decision of the filter of the `index`-th binding
    pub fn binding_decision(&mut self, index: usize, filter: &str, ignored: bool) {
        let dim = Dimension::Binding {
            index,
            filter: filter.to_owned(),
        };
        self.add(dim, ignored);
    }

    pub fn dispatcher(&self) -> Stats {
        self.get(&Dimension::Dispatcher)
    }

    pub fn binding(&self, index: usize) -> Stats {
        self.from_start
            .iter()
            .find_map(|(dim, stats)| match dim {
                Dimension::Binding { index: i, .. } if *i == index => Some(*stats),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn get(&self, dim: &Dimension) -> Stats {
        self.from_start.get(dim).copied().unwrap_or_default()
    }

    fn add(&mut self, dim: Dimension, ignored: bool) {
        self.from_start.entry(dim).or_default().add(ignored);
    }

    pub fn dump_processing_stats(&self) {
        tracing::info!(target: "owntracks", "Filtering statistics:");
        for (dim, stats) in &self.from_start {
            stats.dump_statistics(dim)
        }
    }
}

impl Stats {
    pub fn add(&mut self, ignored: bool) {
        self.messages_in += 1;
        if ignored {
            self.suppressed += 1;
        } else {
            self.forwarded += 1;
        }
    }

    pub fn dump_statistics(&self, dim: &Dimension) {
        tracing::info!(target: "owntracks", "    - {dim}");
        tracing::info!(target: "owntracks", "         - input count: {}", self.messages_in);
        tracing::info!(target: "owntracks", "         - suppressed count: {}", self.suppressed);
        tracing::info!(target: "owntracks", "         - forwarded count: {}", self.forwarded);
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Dispatcher => write!(f, "dispatcher"),
            Dimension::Binding { index, filter } => write!(f, "binding #{index} ({filter})"),
        }
    }
}
