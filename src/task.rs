use tracing::*;

/// Lifecycle of something the control loop runs against a subsystem `S`.
///
/// A scheduler calls `initialize` once, then `execute` every tick until
/// `is_finished` reports true or the task is cancelled, then `end` exactly once.
pub trait Task<S> {
    fn initialize(&mut self, subsystem: &mut S);
    fn execute(&mut self, subsystem: &mut S);
    /// `interrupted` is true when the task was cancelled before finishing
    fn end(&mut self, subsystem: &mut S, interrupted: bool);
    fn is_finished(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Scheduled,
    Running,
    Finished,
    Interrupted,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Finished | TaskStatus::Interrupted)
    }
}

/// Polls a single task through its lifecycle, one control loop tick at a time
#[derive(Debug)]
pub struct TaskRunner<T> {
    task: T,
    status: TaskStatus,
}

impl<T> TaskRunner<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            status: TaskStatus::Scheduled,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn into_inner(self) -> T {
        self.task
    }

    /// Initializes on the first tick, then executes and checks for completion
    pub fn tick<S>(&mut self, subsystem: &mut S) -> TaskStatus
    where
        T: Task<S>,
    {
        if self.status == TaskStatus::Scheduled {
            self.task.initialize(subsystem);
            self.status = TaskStatus::Running;
        }
        if self.status == TaskStatus::Running {
            self.task.execute(subsystem);
            if self.task.is_finished() {
                self.task.end(subsystem, false);
                self.status = TaskStatus::Finished;
                debug!("Task finished");
            }
        }
        self.status
    }

    /// Ends a running task as interrupted. A task that never started is dropped without `end`.
    pub fn cancel<S>(&mut self, subsystem: &mut S)
    where
        T: Task<S>,
    {
        match self.status {
            TaskStatus::Running => {
                self.task.end(subsystem, true);
                self.status = TaskStatus::Interrupted;
                debug!("Task interrupted");
            }
            TaskStatus::Scheduled => self.status = TaskStatus::Interrupted,
            TaskStatus::Finished | TaskStatus::Interrupted => (),
        }
    }
}
