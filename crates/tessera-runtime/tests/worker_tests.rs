mod common;

use std::sync::Arc;

use common::*;
use tessera_runtime::{MeshWorker, WorkerConfig, WorkerEvent, WorkerMsg};
use tessera_world::{BlockPos, SectionKey};

const ORIGIN: SectionKey = SectionKey { x: 0, y: 0, z: 0 };

fn ready_worker() -> MeshWorker {
    let mut w = MeshWorker::new(0, WorkerConfig::default());
    w.handle(WorkerMsg::Metadata(meta()));
    w.handle(WorkerMsg::BlockStates(table()));
    w
}

fn chunk(x: i32, z: i32) -> WorkerMsg {
    WorkerMsg::Chunk {
        x,
        z,
        payload: Arc::new(floor_column()),
    }
}

fn dirty(key: SectionKey) -> WorkerMsg {
    WorkerMsg::Dirty { key, active: true }
}

fn finished(events: &[WorkerEvent]) -> Vec<(SectionKey, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            WorkerEvent::SectionFinished { key, marks, .. } => Some((*key, *marks)),
            _ => None,
        })
        .collect()
}

#[test]
fn dirty_section_is_built_then_finished() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    assert!(w.handle(dirty(ORIGIN)).is_none());
    let events = w.tick();
    assert_eq!(events.len(), 2);
    match &events[0] {
        WorkerEvent::Geometry { key, geometry, .. } => {
            assert_eq!(*key, ORIGIN);
            assert!(!geometry.opaque.is_empty());
        }
        other => panic!("expected geometry, got {other:?}"),
    }
    assert_eq!(finished(&events), vec![(ORIGIN, 1)]);
    assert!(w.tick().is_empty());
}

#[test]
fn repeated_marks_coalesce_into_one_rebuild() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    for _ in 0..3 {
        w.handle(dirty(ORIGIN));
    }
    let events = w.tick();
    let geoms = events.iter().filter(|e| matches!(e, WorkerEvent::Geometry { .. })).count();
    assert_eq!(geoms, 1);
    assert_eq!(finished(&events), vec![(ORIGIN, 3)]);
}

#[test]
fn unloaded_column_only_finishes() {
    let mut w = ready_worker();
    let key = SectionKey::from_origin(64, 0, 64);
    w.handle(dirty(key));
    let events = w.tick();
    assert_eq!(events.len(), 1);
    assert_eq!(finished(&events), vec![(key, 1)]);
}

#[test]
fn absent_section_in_loaded_column_yields_empty_geometry() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    let key = SectionKey::from_origin(0, 128, 0);
    w.handle(dirty(key));
    let events = w.tick();
    match &events[0] {
        WorkerEvent::Geometry { geometry, .. } => assert!(geometry.is_empty()),
        other => panic!("expected geometry, got {other:?}"),
    }
    assert_eq!(finished(&events), vec![(key, 1)]);
}

#[test]
fn missing_tables_skip_the_build_but_still_finish() {
    let mut w = MeshWorker::new(3, WorkerConfig::default());
    w.handle(chunk(0, 0));
    w.handle(dirty(ORIGIN));
    let events = w.tick();
    assert_eq!(events.len(), 1);
    assert_eq!(finished(&events), vec![(ORIGIN, 1)]);
}

#[test]
fn unmarking_retires_marks_immediately() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    w.handle(dirty(ORIGIN));
    w.handle(dirty(ORIGIN));
    let ev = w.handle(WorkerMsg::Dirty {
        key: ORIGIN,
        active: false,
    });
    assert!(matches!(ev, Some(WorkerEvent::SectionFinished { marks: 2, .. })));
    assert!(w.tick().is_empty());
    // Nothing left to withdraw
    assert!(
        w.handle(WorkerMsg::Dirty {
            key: ORIGIN,
            active: false
        })
        .is_none()
    );
}

#[test]
fn block_update_reaches_the_mirror() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    let pos = BlockPos::new(3, 5, 3);
    w.handle(WorkerMsg::BlockUpdate { pos, state: STONE });
    assert_eq!(w.world().get_block(pos), Some(STONE));
    w.handle(WorkerMsg::UnloadChunk { x: 0, z: 0 });
    assert_eq!(w.world().get_block(pos), None);
}

#[test]
fn reset_drops_world_and_dirty_and_stamps_new_epoch() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    w.handle(dirty(ORIGIN));
    w.handle(WorkerMsg::Reset { epoch: 7 });
    assert_eq!(w.dirty_len(), 0);
    assert_eq!(w.world().column_count(), 0);
    assert!(w.tick().is_empty());

    w.handle(chunk(0, 0));
    w.handle(dirty(ORIGIN));
    for ev in w.tick() {
        match ev {
            WorkerEvent::Geometry { epoch, .. } | WorkerEvent::SectionFinished { epoch, .. } => {
                assert_eq!(epoch, 7)
            }
            WorkerEvent::Debug { .. } => panic!("unexpected diagnostic"),
        }
    }
}

#[test]
fn builds_run_in_key_order() {
    let mut w = ready_worker();
    w.handle(chunk(0, 0));
    w.handle(chunk(16, 0));
    let a = SectionKey::from_origin(16, 0, 0);
    let b = SectionKey::from_origin(0, 16, 0);
    w.handle(dirty(a));
    w.handle(dirty(ORIGIN));
    w.handle(dirty(b));
    let order: Vec<SectionKey> = finished(&w.tick()).into_iter().map(|(k, _)| k).collect();
    assert_eq!(order, vec![ORIGIN, b, a]);
}

#[test]
fn failed_build_reports_and_still_finishes() {
    let mut w = ready_worker();
    w.handle(WorkerMsg::Chunk {
        x: 0,
        z: 0,
        payload: Arc::new(broken_column()),
    });
    w.handle(dirty(ORIGIN));
    w.handle(dirty(ORIGIN));
    let events = w.tick();
    assert_eq!(events.len(), 2);
    match &events[0] {
        WorkerEvent::Debug { worker, message, stack } => {
            assert_eq!(*worker, 0);
            assert!(message.contains("non-finite"), "{message}");
            assert!(stack.is_none());
        }
        other => panic!("expected debug, got {other:?}"),
    }
    assert_eq!(finished(&events), vec![(ORIGIN, 2)]);
    assert_eq!(w.dirty_len(), 0);
}
