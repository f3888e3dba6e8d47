// Eisenhower matrix classification

use serde::Serialize;

use crate::models::Task;
use crate::planner::RatingScale;

/// Eisenhower quadrant, derived from urgency and importance at read time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quadrant {
    /// Urgent and important
    DoFirst,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Later,
}

impl Quadrant {
    /// Planning order: Q1, Q2, Q3, Q4
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Later,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Q1",
            Quadrant::Schedule => "Q2",
            Quadrant::Delegate => "Q3",
            Quadrant::Later => "Q4",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Later => "Maybe Later",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Urgent & Important",
            Quadrant::Schedule => "Not Urgent, Important",
            Quadrant::Delegate => "Urgent, Not Important",
            Quadrant::Later => "Not Urgent, Not Important",
        }
    }
}

/// Classify a task by urgency and importance only
pub fn quadrant(task: &Task, scale: RatingScale) -> Quadrant {
    let threshold = scale.high_threshold();
    let high_importance = task.importance >= threshold;
    let high_urgency = task.urgency >= threshold;

    match (high_importance, high_urgency) {
        (true, true) => Quadrant::DoFirst,
        (true, false) => Quadrant::Schedule,
        (false, true) => Quadrant::Delegate,
        (false, false) => Quadrant::Later,
    }
}

/// Incomplete tasks partitioned by quadrant, input order kept in each bucket
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuadrantBuckets<'a> {
    pub do_first: Vec<&'a Task>,
    pub schedule: Vec<&'a Task>,
    pub delegate: Vec<&'a Task>,
    pub later: Vec<&'a Task>,
}

impl<'a> QuadrantBuckets<'a> {
    pub fn get(&self, quadrant: Quadrant) -> &[&'a Task] {
        match quadrant {
            Quadrant::DoFirst => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Later => &self.later,
        }
    }

    fn get_mut(&mut self, quadrant: Quadrant) -> &mut Vec<&'a Task> {
        match quadrant {
            Quadrant::DoFirst => &mut self.do_first,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Later => &mut self.later,
        }
    }

    /// Buckets in planning order
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[&'a Task])> + '_ {
        Quadrant::ALL.into_iter().map(move |q| (q, self.get(q)))
    }

    pub fn len(&self) -> usize {
        self.do_first.len() + self.schedule.len() + self.delegate.len() + self.later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drop completed tasks and partition the rest by quadrant
pub fn bucketize(tasks: &[Task], scale: RatingScale) -> QuadrantBuckets<'_> {
    let mut buckets = QuadrantBuckets::default();
    for task in tasks.iter().filter(|t| !t.completed) {
        buckets.get_mut(quadrant(task, scale)).push(task);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rated(title: &str, urgency: u32, importance: u32) -> Task {
        let mut task = Task::new(
            "HIST".to_string(),
            title.to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            30,
        );
        task.urgency = urgency;
        task.importance = importance;
        task
    }

    #[test]
    fn test_quadrant_rules() {
        let scale = RatingScale::Percent;
        assert_eq!(quadrant(&rated("a", 80, 90), scale), Quadrant::DoFirst);
        assert_eq!(quadrant(&rated("b", 10, 90), scale), Quadrant::Schedule);
        assert_eq!(quadrant(&rated("c", 80, 10), scale), Quadrant::Delegate);
        assert_eq!(quadrant(&rated("d", 10, 10), scale), Quadrant::Later);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scale = RatingScale::Percent;
        assert_eq!(quadrant(&rated("edge", 50, 50), scale), Quadrant::DoFirst);
        assert_eq!(quadrant(&rated("below", 49, 49), scale), Quadrant::Later);
    }

    #[test]
    fn test_decimal_threshold() {
        let scale = RatingScale::Decimal;
        assert_eq!(quadrant(&rated("a", 7, 7), scale), Quadrant::DoFirst);
        assert_eq!(quadrant(&rated("b", 6, 7), scale), Quadrant::Schedule);
        assert_eq!(quadrant(&rated("c", 7, 6), scale), Quadrant::Delegate);
        assert_eq!(quadrant(&rated("d", 5, 5), scale), Quadrant::Later);
    }

    #[test]
    fn test_bucketize_partitions_incomplete_tasks() {
        let mut done = rated("done", 90, 90);
        done.completed = true;
        let tasks = vec![
            rated("q1-first", 90, 90),
            rated("q4", 0, 0),
            done,
            rated("q2", 0, 60),
            rated("q1-second", 60, 60),
            rated("q3", 60, 0),
        ];

        let buckets = bucketize(&tasks, RatingScale::Percent);
        assert_eq!(buckets.len(), 5);
        let titles = |q: Quadrant| -> Vec<&str> {
            buckets.get(q).iter().map(|t| t.title.as_str()).collect()
        };
        assert_eq!(titles(Quadrant::DoFirst), vec!["q1-first", "q1-second"]);
        assert_eq!(titles(Quadrant::Schedule), vec!["q2"]);
        assert_eq!(titles(Quadrant::Delegate), vec!["q3"]);
        assert_eq!(titles(Quadrant::Later), vec!["q4"]);
        assert!(buckets.iter().all(|(_, b)| b.iter().all(|t| !t.completed)));
    }

    #[test]
    fn test_bucketize_empty() {
        let buckets = bucketize(&[], RatingScale::Percent);
        assert!(buckets.is_empty());
    }
}
