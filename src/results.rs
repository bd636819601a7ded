use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::palette::Color;
use crate::session::Session;
use crate::time_series::ReactionPoint;
use crate::trial::Trial;
use crate::util::{format_secs, mean, round2, std_dev};

/// One row of the results table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub index: usize,
    /// Reaction time rounded to two decimals
    pub reaction_secs: f64,
    pub word: Color,
    pub ink: Color,
    pub response: Color,
    pub correct: bool,
}

/// Aggregates computed once when a session ends
#[derive(Debug, Clone)]
pub struct Results {
    score: usize,
    budget: usize,
    trials: Vec<Trial>,
    started_local: DateTime<Local>,
}

impl Results {
    pub fn new(
        score: usize,
        budget: usize,
        trials: Vec<Trial>,
        started_local: DateTime<Local>,
    ) -> Self {
        Self {
            score,
            budget,
            trials,
            started_local,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self::new(
            session.score(),
            session.budget(),
            session.trials().to_vec(),
            session.started_local(),
        )
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn started_local(&self) -> DateTime<Local> {
        self.started_local
    }

    pub fn has_data(&self) -> bool {
        !self.trials.is_empty()
    }

    fn reaction_secs(&self) -> Vec<f64> {
        self.trials.iter().map(Trial::reaction_secs).collect()
    }

    /// Mean reaction time rounded to two decimals, None when no trial was recorded
    pub fn mean_reaction_time(&self) -> Option<f64> {
        mean(&self.reaction_secs()).map(round2)
    }

    pub fn std_dev(&self) -> Option<f64> {
        std_dev(&self.reaction_secs()).map(round2)
    }

    /// Percentage of recorded trials answered correctly
    pub fn accuracy(&self) -> Option<f64> {
        if self.trials.is_empty() {
            return None;
        }
        Some((self.score as f64 / self.trials.len() as f64 * 100.0).round())
    }

    /// Reaction times split into (congruent, incongruent)
    fn by_congruence(&self) -> (Vec<f64>, Vec<f64>) {
        self.trials.iter().partition_map(|t| {
            if t.stimulus.is_congruent() {
                itertools::Either::Left(t.reaction_secs())
            } else {
                itertools::Either::Right(t.reaction_secs())
            }
        })
    }

    /// Mean reaction time split into (congruent, incongruent)
    pub fn congruence_means(&self) -> (Option<f64>, Option<f64>) {
        let (congruent, incongruent) = self.by_congruence();
        (
            mean(&congruent).map(round2),
            mean(&incongruent).map(round2),
        )
    }

    /// Incongruent minus congruent mean reaction time, rounded once
    pub fn interference(&self) -> Option<f64> {
        let (congruent, incongruent) = self.by_congruence();
        Some(round2(mean(&incongruent)? - mean(&congruent)?))
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.trials
            .iter()
            .map(|t| TableRow {
                index: t.index,
                reaction_secs: round2(t.reaction_secs()),
                word: t.stimulus.word,
                ink: t.stimulus.ink,
                response: t.response,
                correct: t.correct,
            })
            .collect()
    }

    pub fn chart_points(&self) -> Vec<ReactionPoint> {
        self.trials.iter().map(ReactionPoint::from).collect()
    }

    pub fn headline(&self) -> String {
        format!(
            "Test Finished. Your score is {} out of {}.",
            self.score, self.budget
        )
    }

    /// Short textual summary shown next to the table and chart
    pub fn summary_lines(&self) -> Vec<String> {
        let Some(avg) = self.mean_reaction_time() else {
            return vec![
                String::from("Average Response Time: no data"),
                String::from("No responses were recorded before the session ended."),
            ];
        };

        let mut lines = vec![format!("Average Response Time: {avg:.2} seconds")];

        let mut stats = Vec::new();
        if let Some(sd) = self.std_dev() {
            stats.push(format!("sd {sd:.2} s"));
        }
        if let Some(acc) = self.accuracy() {
            stats.push(format!("{acc}% correct"));
        }
        stats.push(format!("{} trials", self.trials.len()));
        lines.push(stats.iter().join("   "));

        let (congruent, incongruent) = self.congruence_means();
        let mut effect = format!(
            "congruent {}   incongruent {}",
            format_secs(congruent),
            format_secs(incongruent)
        );
        if let Some(delta) = self.interference() {
            effect.push_str(&format!("   interference {delta:+.2} s"));
        }
        lines.push(effect);

        lines.push(String::from(
            "The table shows the reaction time for each trial. The graph displays their progression over the trials.",
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::Stimulus;
    use std::time::Duration;

    fn trial(index: usize, word: Color, ink: Color, response: Color, millis: u64) -> Trial {
        Trial {
            index,
            stimulus: Stimulus::new(word, ink),
            response,
            reaction_time: Duration::from_millis(millis),
            correct: response == ink,
        }
    }

    fn results(trials: Vec<Trial>) -> Results {
        let score = trials.iter().filter(|t| t.correct).count();
        Results::new(score, 20, trials, Local::now())
    }

    #[test]
    fn test_mean_reaction_time_rounds_to_two_places() {
        let r = results(vec![
            trial(1, Color::Red, Color::Blue, Color::Blue, 1200),
            trial(2, Color::Red, Color::Red, Color::Red, 800),
            trial(3, Color::Green, Color::Black, Color::Green, 1500),
        ]);
        assert_eq!(r.mean_reaction_time(), Some(1.17));
    }

    #[test]
    fn test_empty_results_report_no_data() {
        let r = results(vec![]);
        assert!(!r.has_data());
        assert_eq!(r.mean_reaction_time(), None);
        assert_eq!(r.std_dev(), None);
        assert_eq!(r.accuracy(), None);
        assert_eq!(r.interference(), None);
        assert!(r.table_rows().is_empty());
        assert!(r.chart_points().is_empty());
        assert!(r.summary_lines()[0].contains("no data"));
    }

    #[test]
    fn test_table_rows_preserve_order_and_round() {
        let r = results(vec![
            trial(1, Color::Red, Color::Blue, Color::Blue, 1234),
            trial(2, Color::Brown, Color::Purple, Color::Brown, 456),
        ]);
        let rows = r.table_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].reaction_secs, 1.23);
        assert!(rows[0].correct);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].reaction_secs, 0.46);
        assert_eq!(rows[1].response, Color::Brown);
        assert!(!rows[1].correct);
    }

    #[test]
    fn test_chart_points_follow_trial_index() {
        let r = results(vec![
            trial(1, Color::Red, Color::Blue, Color::Blue, 1000),
            trial(2, Color::Red, Color::Blue, Color::Blue, 500),
        ]);
        let points: Vec<(f64, f64)> = r.chart_points().into_iter().map(Into::into).collect();
        assert_eq!(points, vec![(1.0, 1.0), (2.0, 0.5)]);
    }

    #[test]
    fn test_accuracy_and_interference() {
        let r = results(vec![
            trial(1, Color::Red, Color::Red, Color::Red, 500),
            trial(2, Color::Blue, Color::Blue, Color::Blue, 700),
            trial(3, Color::Red, Color::Green, Color::Green, 1000),
            trial(4, Color::Yellow, Color::Black, Color::Yellow, 1200),
        ]);
        assert_eq!(r.accuracy(), Some(75.0));
        assert_eq!(r.congruence_means(), (Some(0.6), Some(1.1)));
        assert_eq!(r.interference(), Some(0.5));
    }

    #[test]
    fn test_interference_rounds_the_exact_difference() {
        // rounded means would be 1.00 and 1.02
        let r = results(vec![
            trial(1, Color::Red, Color::Red, Color::Red, 1004),
            trial(2, Color::Red, Color::Blue, Color::Blue, 1016),
        ]);
        assert_eq!(r.congruence_means(), (Some(1.0), Some(1.02)));
        assert_eq!(r.interference(), Some(0.01));
    }

    #[test]
    fn test_interference_undefined_without_both_kinds() {
        let r = results(vec![trial(1, Color::Red, Color::Red, Color::Red, 500)]);
        assert_eq!(r.congruence_means(), (Some(0.5), None));
        assert_eq!(r.interference(), None);
    }

    #[test]
    fn test_headline_uses_budget() {
        let r = results(vec![trial(1, Color::Red, Color::Red, Color::Red, 500)]);
        assert_eq!(r.headline(), "Test Finished. Your score is 1 out of 20.");
    }

    #[test]
    fn test_summary_is_idempotent() {
        let r = results(vec![
            trial(1, Color::Red, Color::Blue, Color::Blue, 1200),
            trial(2, Color::Red, Color::Red, Color::Red, 800),
        ]);
        assert_eq!(r.summary_lines(), r.summary_lines());
        assert_eq!(r.table_rows(), r.table_rows());
        assert!(r.summary_lines()[0].contains("1.00"));
    }
}
