//! Scoped listener subscriptions
//!
//! Every registration hands back a [`Subscription`] whose release runs
//! exactly once: on [`Subscription::release`] or when the guard is dropped.

/// Guard for one registered listener (or timer)
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    name: &'static str,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(name: &'static str, release: impl FnOnce() + 'static) -> Self {
        Self {
            name,
            release: Some(Box::new(release)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Release now
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            log::debug!("Releasing listener `{}`", self.name);
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// A set of subscriptions released together
#[derive(Debug, Default)]
pub struct Subscriptions {
    items: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.items.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Release everything, most recent first
    pub fn release_all(&mut self) {
        while let Some(subscription) = self.items.pop() {
            subscription.release();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn test_release_runs_once() {
        let (count, release) = counter();
        let sub = Subscription::new("mousemove", release);
        sub.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let (count, release) = counter();
        {
            let _sub = Subscription::new("touchend", release);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_release_all() {
        let mut subs = Subscriptions::new();
        let mut counts = Vec::new();
        for name in ["mousemove", "touchmove", "mouseup", "touchend"] {
            let (count, release) = counter();
            subs.push(Subscription::new(name, release));
            counts.push(count);
        }
        assert_eq!(subs.len(), 4);
        subs.release_all();
        assert!(subs.is_empty());
        drop(subs);
        assert!(counts.iter().all(|c| c.get() == 1));
    }
}
