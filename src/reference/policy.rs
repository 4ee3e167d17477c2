// src/reference/policy.rs

use super::types::PolicyEvent;

/// Policy events ordered by year, answering cumulative-delta queries.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTimeline<'a> {
    events: Vec<&'a PolicyEvent>,
}

impl<'a> PolicyTimeline<'a> {
    pub fn new(events: &'a [PolicyEvent]) -> Self {
        let mut events: Vec<&PolicyEvent> = events.iter().collect();
        events.sort_by_key(|e| e.year);
        Self { events }
    }

    /// Sum of `avg_duty_change` over every event with `event.year <= year`.
    ///
    /// Events are never retracted, so this only accumulates as `year` grows.
    pub fn cumulative_delta(&self, year: i32) -> f64 {
        self.events
            .iter()
            .take_while(|e| e.year <= year)
            .map(|e| e.avg_duty_change)
            .sum()
    }

    /// Events falling inside `from..=to`, oldest first.
    pub fn events_between(&self, from: i32, to: i32) -> impl Iterator<Item = &'a PolicyEvent> + '_ {
        self.events
            .iter()
            .copied()
            .filter(move |e| e.year >= from && e.year <= to)
    }
}
