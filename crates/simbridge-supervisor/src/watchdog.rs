use tracing::debug;

/// Polls parent-process liveness and force-kills the bridge on loss.
///
/// The parent's identity is captured exactly once; the bridge exists to
/// serve that one process and no other. Liveness is judged by comparing the
/// current parent pid against the recorded one: the kernel reparents this
/// process to init (or the nearest subreaper) the moment the parent dies, so
/// a changed ppid detects the loss even when the recorded pid has since been
/// recycled — the current OS-reported parent id is never trusted on its own.
pub struct ParentWatchdog {
    parent: libc::pid_t,
}

impl ParentWatchdog {
    /// Record the current parent pid.
    pub fn capture() -> Self {
        // SAFETY: getppid cannot fail and has no side effects.
        let parent = unsafe { libc::getppid() };
        debug!(parent, "watching parent process");
        Self { parent }
    }

    /// The recorded parent pid.
    pub fn parent_pid(&self) -> i32 {
        self.parent
    }

    /// Whether the recorded parent still owns this process.
    pub fn parent_alive(&self) -> bool {
        // SAFETY: getppid cannot fail and has no side effects.
        unsafe { libc::getppid() == self.parent }
    }

    /// Busy-poll until the parent disappears, then kill this process.
    ///
    /// The poll spins rather than sleeping or subscribing to an event: the
    /// parent can die uncleanly (killed, crashed, orphaned), and in this
    /// short-lived single-purpose child, termination latency wins over CPU
    /// idling. In-flight loop state is disposable, so the kill is immediate
    /// and unconditional.
    pub fn watch(&self) -> ! {
        while self.parent_alive() {
            std::hint::spin_loop();
        }
        terminate()
    }
}

/// SIGKILL the current process. Uninterceptable; no cleanup handlers run.
fn terminate() -> ! {
    // SAFETY: signaling our own pid with SIGKILL; the call does not return
    // control flow that matters once the signal is delivered.
    unsafe {
        libc::kill(libc::getpid(), libc::SIGKILL);
    }
    // Delivery can lag the syscall by a scheduler tick.
    loop {
        std::hint::spin_loop();
    }
}
