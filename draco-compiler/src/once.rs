use std::sync::OnceLock;

/// Get the value of `cell`, computing it with `f` if it is empty.
///
/// Unlike [`OnceLock::get_or_init`], `f` runs without holding any lock. Two
/// threads racing on the same cell may both compute a value, but only the first
/// one stored is ever observed. Reentrant initialization of the same cell from
/// one thread therefore recomputes instead of deadlocking.
pub(crate) fn get_or_compute<T>(cell: &OnceLock<T>, f: impl FnOnce() -> T) -> &T {
    if let Some(value) = cell.get() {
        return value;
    }

    let _ = cell.set(f());
    cell.get().expect("the cell was initialized above")
}
