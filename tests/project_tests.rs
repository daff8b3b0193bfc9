/// Integration tests for project files
/// These tests save worlds to JSON, load them back and check nothing is lost.
mod common;

use cgmath::Point3;
use common::{snapshot, world, GLASS, STONE};
use voxel_sculpt::project::{file_name_for, materials_csv, ProjectError};
use voxel_sculpt::voxels::block::Rotation;
use voxel_sculpt::ProjectData;

#[test]
fn test_save_clear_load_reproduces_the_world() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut world = world();
    world.begin_batch();
    for _ in 0..500 {
        let id = [STONE, GLASS, 16, 22][rng.usize(..4)];
        world.place_block(
            rng.i32(-30..30),
            rng.i32(-5..20),
            rng.i32(-30..30),
            id,
            Rotation::from_bits(rng.u8(..)),
        );
    }
    world.end_batch();

    let before = snapshot(&world);
    let counts = world.get_block_counts().clone();
    let faces = world.face_count();

    let path = std::env::temp_dir().join(format!("voxel_sculpt_{}_{}", std::process::id(), file_name_for("Round Trip")));
    ProjectData::capture(&world, "Round Trip").save_to_path(&path).unwrap();

    world.clear();
    assert!(world.get_all_blocks().is_empty());

    let project = ProjectData::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(project.name, "Round Trip");
    assert_eq!(project.version, 1);
    project.apply(&mut world);

    assert_eq!(snapshot(&world), before);
    assert_eq!(world.get_block_counts(), &counts);
    assert_eq!(world.face_count(), faces);
}

#[test]
fn test_malformed_project_leaves_world_untouched() {
    let mut world = world();
    world.place_block(1, 1, 1, STONE, Rotation::R0);

    let result = ProjectData::from_json_str(r#"{"name":"x","version":1,"created":"now"}"#);
    assert!(matches!(result, Err(ProjectError::MissingBlocks)));

    let result = ProjectData::from_json_str(r#"{"name":"x","version":1,"created":"now","blocks":[{"x":0}]}"#);
    assert!(matches!(result, Err(ProjectError::Json(_))));

    assert_eq!(world.get_block(1, 1, 1), STONE);
}

#[test]
fn test_load_is_one_batch() {
    let mut world = world();
    let json = r#"{"name":"Wall","version":1,"created":"2024-01-01T00:00:00.000Z","blocks":[
        {"x":0,"y":0,"z":0,"id":6},
        {"x":1,"y":0,"z":0,"id":6,"rotation":2},
        {"x":2,"y":0,"z":0,"id":16,"rotation":259}
    ]}"#;
    let project = ProjectData::from_json_str(json).unwrap();

    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = calls.clone();
    world.subscribe(move |_| counter.set(counter.get() + 1));
    project.apply(&mut world);

    // One notification for the clear, one for the batch.
    // Rotations keep only their two low bits, however large.
    assert_eq!(calls.get(), 2);
    assert_eq!(world.get_block_rotation(1, 0, 0), Rotation::R180);
    assert_eq!(world.get_block_rotation(2, 0, 0), Rotation::R270);
    assert_eq!(world.mesh(Point3::new(0, 0, 0)).unwrap().face_count(), 14);
}

#[test]
fn test_materials_list_matches_counts() {
    let mut world = world();
    world.fill_region(Point3::new(0, 0, 0), Point3::new(7, 7, 1), STONE, Rotation::R0);
    world.place_block(0, 8, 0, GLASS, Rotation::R0);

    let csv = materials_csv(world.get_block_counts(), &world.registry().get());
    assert_eq!(csv, "Block Name,Count,Stacks\n\"Stone\",128,2.00\n\"Glass\",1,0.02\n");
}
