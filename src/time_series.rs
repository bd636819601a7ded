/// One point on the reaction time chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionPoint {
    pub trial: f64,
    pub secs: f64,
}

impl ReactionPoint {
    pub fn new(trial: usize, secs: f64) -> Self {
        Self {
            trial: trial as f64,
            secs,
        }
    }
}

impl From<&crate::trial::Trial> for ReactionPoint {
    fn from(t: &crate::trial::Trial) -> Self {
        ReactionPoint::new(t.index, t.reaction_secs())
    }
}

impl From<ReactionPoint> for (f64, f64) {
    fn from(p: ReactionPoint) -> Self {
        (p.trial, p.secs)
    }
}
