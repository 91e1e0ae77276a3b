//! Processing-unit discovery for sizing worker pools.
//!
//! Implemented with platform APIs (libc on Linux/macOS) so that the affinity
//! mask of the current process is respected where the platform exposes one.

// ============================================================================
// Linux implementation using libc
// ============================================================================

#[cfg(target_os = "linux")]
mod platform {
    /// Number of cores the current process may run on
    pub fn usable_cores() -> Option<usize> {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0 {
                let count = libc::CPU_COUNT(&set);
                if count > 0 {
                    return Some(count as usize);
                }
            }
        }
        online_cores()
    }

    /// Number of cores currently online
    pub fn online_cores() -> Option<usize> {
        unsafe {
            let num_cpus = libc::sysconf(libc::_SC_NPROCESSORS_ONLN);
            if num_cpus <= 0 {
                return None;
            }
            Some(num_cpus as usize)
        }
    }
}

// ============================================================================
// macOS implementation using libc
// ============================================================================

#[cfg(target_os = "macos")]
mod platform {
    // No affinity masks on macOS, every online core is usable
    pub fn usable_cores() -> Option<usize> {
        online_cores()
    }

    pub fn online_cores() -> Option<usize> {
        unsafe {
            let num_cpus = libc::sysconf(libc::_SC_NPROCESSORS_ONLN);
            if num_cpus <= 0 {
                return None;
            }
            Some(num_cpus as usize)
        }
    }
}

// ============================================================================
// Fallback for other platforms
// ============================================================================

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod platform {
    pub fn usable_cores() -> Option<usize> {
        online_cores()
    }

    pub fn online_cores() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Number of processing units available to this process (at least 1).
pub fn available_cores() -> usize {
    platform::usable_cores()
        .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1)
        .max(1)
}

/// Number of online processing units, ignoring affinity restrictions.
pub fn online_cores() -> Option<usize> {
    platform::online_cores()
}

/// Resolve the number of workers for a dispatch over `tasks` items.
///
/// `requested` falls back to [`available_cores`]; the result never exceeds
/// the number of tasks and is never below one.
pub fn worker_count(requested: Option<usize>, tasks: usize) -> usize {
    requested
        .filter(|&n| n > 0)
        .unwrap_or_else(available_cores)
        .min(tasks)
        .max(1)
}
