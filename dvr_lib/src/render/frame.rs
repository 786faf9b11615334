/// Coalesces repaint requests.
///
/// Any number of requests between two frames produce a single repaint.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    scheduled: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this request scheduled a new repaint
    pub fn request(&mut self) -> bool {
        let newly = !self.scheduled;
        self.scheduled = true;
        newly
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Frame callback: consumes the pending request
    pub fn take(&mut self) -> bool {
        if self.scheduled {
            self.scheduled = false;
            self.frames += 1;
            true
        } else {
            false
        }
    }

    /// Repaints performed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn coalesces() {
        let mut s = FrameScheduler::new();
        assert!(!s.take());

        assert!(s.request());
        assert!(!s.request());
        assert!(!s.request());
        assert!(s.is_scheduled());

        assert!(s.take());
        assert!(!s.take());
        assert_eq!(s.frames(), 1);
    }
}
