//! Concurrent access to one manager from several threads.

use std::sync::{Arc, Barrier};
use std::thread;

use filevol::{CreateOptions, FilevolError, ToolOp};
use filevol_test_utils::TestVolumes;

#[test]
fn concurrent_mounts_of_one_volume_serialize() {
    let ctx = Arc::new(TestVolumes::new());
    ctx.manager.create("shared", &CreateOptions::default()).unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ctx.manager.mount("shared")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let expected = ctx.mount_path("shared");
    let mut ok = 0;
    for result in results {
        match result {
            Ok(path) => {
                assert_eq!(path, expected);
                ok += 1;
            }
            Err(err) => {
                assert!(matches!(err, FilevolError::ToolFailure { op: ToolOp::Mount, .. }));
                assert_eq!(err.tool_target(), Some(expected.as_path()));
            }
        }
    }

    // the second mount hits an occupied mount point
    assert_eq!(ok, 1);
    assert!(ctx.tools.is_mounted(&expected));
}

#[test]
fn concurrent_creates_of_one_name_yield_one_image() {
    let ctx = Arc::new(TestVolumes::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ctx.manager.create("race", &CreateOptions::default())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let created = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(FilevolError::AlreadyExists(_))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(rejected, threads - 1);
    assert_eq!(
        ctx.tools.ops(),
        vec![ToolOp::Allocate, ToolOp::Format],
        "only the winner may touch the tools"
    );
}

#[test]
fn readers_and_writers_on_different_volumes() {
    let ctx = Arc::new(TestVolumes::new());

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let name = format!("vol{}", i);
                ctx.manager.create(&name, &CreateOptions::default()).unwrap();
                ctx.manager.mount(&name).unwrap();
                ctx.manager.unmount(&name).unwrap();
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                for _ in 0..50 {
                    let volumes = ctx.manager.list().unwrap();
                    assert!(volumes.len() <= 4);
                    for volume in volumes {
                        assert_eq!(volume.mountpoint, ctx.mount_path(&volume.name));
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(ctx.manager.list().unwrap().len(), 4);
}
