use tessera_world::SectionKey;

/// Worker that owns `key`. Depends only on the section grid position, so every
/// mark for a section lands on the same worker.
#[inline]
pub fn worker_index(key: SectionKey, workers: usize) -> usize {
    let (gx, gy, gz) = key.grid();
    let n = workers.max(1) as i64;
    (gx as i64 + gy as i64 + gz as i64).rem_euclid(n) as usize
}
