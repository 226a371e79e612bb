use std::thread::JoinHandle;

/// A value that is (re)computed on a background thread.
///
/// The UI thread calls [`ComputedState::poll`] once per frame; when the task has
/// finished its result replaces the current value and the generation advances.
pub struct ComputedState<T> {
    value: T,
    generation: usize,
    task: Option<JoinHandle<T>>,
}

impl<T> ComputedState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: 0,
            task: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Number of results that have been applied so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Replaces the value immediately and detaches any running task.
    pub fn set(&mut self, value: T) {
        self.task = None;
        self.value = value;
        self.generation += 1;
    }
}

impl<T: Send + 'static> ComputedState<T> {
    /// Starts `action` on a new thread. A task that is still running is detached and
    /// its result discarded.
    pub fn spawn(&mut self, action: impl FnOnce() -> T + Send + 'static) {
        self.task = Some(std::thread::spawn(action));
    }

    /// Applies the result of a finished task. Returns `true` if the value changed.
    pub fn poll(&mut self) -> bool {
        match self.task.take() {
            Some(handle) if handle.is_finished() => self.apply(handle),
            Some(handle) => {
                self.task = Some(handle);
                false
            }
            None => false,
        }
    }

    /// Blocks until the running task (if any) is done and applies its result.
    pub fn wait(&mut self) -> bool {
        match self.task.take() {
            Some(handle) => self.apply(handle),
            None => false,
        }
    }

    fn apply(&mut self, handle: JoinHandle<T>) -> bool {
        match handle.join() {
            Ok(value) => {
                self.value = value;
                self.generation += 1;
                true
            }
            Err(_) => {
                tracing::error!("background computation panicked, keeping previous value");
                false
            }
        }
    }
}

impl<T: Default> Default for ComputedState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ComputedState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputedState")
            .field("value", &self.value)
            .field("generation", &self.generation)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn wait_applies_result() {
        let mut state = ComputedState::new(0_u32);
        state.spawn(|| 42);
        assert!(state.is_running());
        assert!(state.wait());
        assert_eq!(*state.value(), 42);
        assert_eq!(state.generation(), 1);
        assert!(!state.is_running());
    }

    #[test]
    fn poll_keeps_value_until_finished() {
        let (release, gate) = mpsc::channel::<()>();
        let mut state = ComputedState::new(String::from("old"));
        state.spawn(move || {
            let _ = gate.recv();
            String::from("new")
        });
        assert!(!state.poll());
        assert_eq!(state.value(), "old");
        release.send(()).unwrap();
        state.wait();
        assert_eq!(state.value(), "new");
    }

    #[test]
    fn panicking_task_keeps_previous_value() {
        let mut state = ComputedState::new(5_i32);
        state.spawn(|| panic!("boom"));
        assert!(!state.wait());
        assert_eq!(*state.value(), 5);
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn set_detaches_running_task() {
        let mut state = ComputedState::new(1_i32);
        state.spawn(|| 2);
        state.set(3);
        assert!(!state.is_running());
        assert!(!state.wait());
        assert_eq!(*state.value(), 3);
    }
}
