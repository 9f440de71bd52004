//! End-to-end create/solve runs against real files.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use jigscramble::store::{self, Layout, Metadata};
use jigscramble::{codec, session, ConfigBuilder, Error};
use ndarray::s;
use tempfile::tempdir;
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 5) as u8, (y * 3) as u8, ((x ^ y) * 7) as u8])
    })
    .save(&path)
    .expect("write png");
    path
}

#[test]
fn create_writes_every_artifact() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let image = write_png(temp.path(), "cat.png", 97, 61);
    let config = ConfigBuilder::new()
        .tile_count(24)
        .output_root(temp.path().join("out"))
        .seed(Some("whiskers".into()))
        .build();

    let created = session::create(&image, &config, &mut config.random()).expect("create");
    let layout = &created.layout;
    assert_eq!(layout.dir(), temp.path().join("out").join("cat"));
    for path in [
        layout.original_image(),
        layout.scrambled_image(),
        layout.metadata(),
        layout.original_ids(),
        layout.scrambled_ids(),
    ] {
        assert!(path.is_file(), "{} missing", path.display());
    }

    let meta = Metadata::read(&layout.metadata()).expect("metadata");
    assert_eq!(meta, created.metadata);
    assert_eq!(meta.filename, "cat.png");
    assert_eq!(meta.squares, 24);
    assert_eq!(meta.rows * meta.cols, 24);
    assert_eq!(meta.dimensions.0, meta.dimensions.1);

    let original = codec::decode(&layout.original_image()).expect("original");
    let scrambled = codec::decode(&layout.scrambled_image()).expect("scrambled");
    assert_eq!(original.height(), meta.rows * meta.dimensions.0);
    assert_eq!(original.width(), meta.cols * meta.dimensions.1);
    assert_eq!(scrambled.pixels.dim(), original.pixels.dim());

    let source = codec::decode(&image).expect("source");
    assert_eq!(
        original.pixels,
        source
            .pixels
            .slice(s![..original.height(), ..original.width(), ..])
    );

    let ids = store::load_grid(&layout.scrambled_ids()).expect("scrambled ids");
    assert_eq!(ids.shape(), (meta.rows, meta.cols));
}

#[test]
fn solve_restores_original() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let image = write_png(temp.path(), "dog.png", 120, 80);
    let config = ConfigBuilder::new()
        .tile_count(40)
        .output_root(temp.path())
        .build();

    let created = session::create(&image, &config, &mut config.random()).expect("create");
    let restored = session::solve(created.layout.dir()).expect("solve");
    assert_eq!(restored, created.layout.restored_image());

    let original = codec::decode(&created.layout.original_image()).expect("original");
    let restored = codec::decode(&restored).expect("restored");
    assert_eq!(restored.pixels, original.pixels);
}

#[test]
fn missing_image_writes_nothing() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("out");
    let config = ConfigBuilder::new().output_root(&out).build();

    let err = session::create(
        &temp.path().join("ghost.png"),
        &config,
        &mut config.random(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ImageDecode { .. }));
    assert!(!out.exists());
}

#[test]
fn path_without_file_name_is_decode_error() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("out");
    let config = ConfigBuilder::new().output_root(&out).build();

    let err = session::create(Path::new("/"), &config, &mut config.random()).unwrap_err();
    assert!(matches!(err, Error::ImageDecode { .. }));
    assert!(!out.exists());
}

#[test]
fn solve_rejects_non_directory() {
    let temp = tempdir().expect("tempdir");
    let file = write_png(temp.path(), "plain.png", 10, 10);
    assert!(matches!(
        session::solve(&file),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn solve_rejects_mismatched_grids() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let image = write_png(temp.path(), "owl.png", 60, 40);
    let config = ConfigBuilder::new()
        .tile_count(6)
        .output_root(temp.path())
        .build();
    let created = session::create(&image, &config, &mut config.random()).expect("create");

    let layout = Layout::in_dir(created.layout.dir(), "owl.png");
    let wrong = jigscramble::grid::IndexGrid::identity(1, 6);
    store::save_grid(&layout.original_ids(), &wrong).expect("overwrite grid");

    assert!(matches!(
        session::solve(layout.dir()),
        Err(Error::InvariantViolation { .. })
    ));
}

#[test]
fn output_folder_can_be_reused() {
    let temp = tempdir().expect("tempdir");
    let image = write_png(temp.path(), "bee.png", 50, 50);
    let config = ConfigBuilder::new()
        .tile_count(4)
        .output_root(temp.path().join("runs"))
        .build();

    store::ensure_dir(&temp.path().join("runs").join("bee")).expect("pre-create");
    session::create(&image, &config, &mut config.random()).expect("first run");
    session::create(&image, &config, &mut config.random()).expect("second run");
}
