//! Integration tests for field replacement.
//!
//! A recording backend stands in for the GPU so that every build and release
//! can be counted and made to fail on demand.

use std::collections::HashSet;

use glyph_galaxy::lifecycle::{FieldBackend, FieldLifecycle, FieldState};
use glyph_galaxy::{FieldError, GalaxyConfig, GlyphRenderer, ParticleBuffers, PointMaterial};
use image::{Rgba, RgbaImage};

#[derive(Default)]
struct Recorder {
    next_id: u32,
    live: HashSet<u32>,
    builds: u32,
    releases: Vec<u32>,
    fail_next_build: bool,
    fail_release_of: Option<u32>,
    last_count: usize,
}

impl FieldBackend for Recorder {
    type Resource = u32;

    fn build(
        &mut self,
        buffers: &ParticleBuffers,
        _material: &PointMaterial,
    ) -> Result<u32, FieldError> {
        if std::mem::take(&mut self.fail_next_build) {
            return Err(FieldError::Resource("allocation refused".into()));
        }
        self.next_id += 1;
        self.builds += 1;
        self.live.insert(self.next_id);
        self.last_count = buffers.len();
        Ok(self.next_id)
    }

    fn release(&mut self, resource: &mut u32) -> Result<(), FieldError> {
        if self.fail_release_of == Some(*resource) {
            return Err(FieldError::Resource(format!("cannot free {}", resource)));
        }
        assert!(self.live.remove(resource), "double release of {}", resource);
        self.releases.push(*resource);
        Ok(())
    }
}

/// A renderer that never draws anything.
struct Blank;

impl GlyphRenderer for Blank {
    fn render(&self, _text: &str, size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 255]))
    }
}

fn config(count: u32) -> GalaxyConfig {
    let mut config = GalaxyConfig::default();
    config.params.count = count;
    config.seed = Some(11);
    config
}

#[test]
fn test_repeated_commits_keep_one_live_field() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(200));
    let mut cfg = config(200);

    let commits = 25;
    for i in 0..commits {
        cfg.params.radius = 1.0 + i as f32 * 0.1;
        lifecycle.regenerate(&mut backend, "M", &cfg).unwrap();
        assert_eq!(backend.live.len(), 1);
    }

    assert_eq!(backend.builds, commits);
    assert_eq!(backend.releases.len(), commits as usize - 1);
    let current = lifecycle.current().unwrap();
    assert_eq!(current.generation, commits as u64);
    assert!(backend.live.contains(&current.resource));
}

#[test]
fn test_first_commit_from_empty_releases_nothing() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(10));
    assert_eq!(lifecycle.state(), FieldState::Empty);

    lifecycle.regenerate(&mut backend, "Ma", &config(10)).unwrap();

    assert!(backend.releases.is_empty());
    assert_eq!(lifecycle.state(), FieldState::Active);
    assert_eq!(lifecycle.current().unwrap().glyph, "Ma");
}

#[test]
fn test_count_change_is_reflected_in_new_field() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(10));

    lifecycle.regenerate(&mut backend, "M", &config(10)).unwrap();
    lifecycle.regenerate(&mut backend, "M", &config(4321)).unwrap();

    assert_eq!(backend.last_count, 4321);
    assert_eq!(lifecycle.current().unwrap().particle_count, 4321);
}

#[test]
fn test_failed_release_keeps_old_field_and_frees_new() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(50));
    lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap();

    backend.fail_release_of = Some(1);
    let err = lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap_err();

    assert!(matches!(err, FieldError::Resource(_)));
    assert_eq!(backend.releases, vec![2]);
    assert_eq!(backend.live, HashSet::from([1]));
    let current = lifecycle.current().unwrap();
    assert_eq!(current.resource, 1);
    assert_eq!(current.generation, 1);
}

#[test]
fn test_failed_build_keeps_old_field() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(50));
    lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap();

    backend.fail_next_build = true;
    assert!(lifecycle.regenerate(&mut backend, "M", &config(50)).is_err());

    assert!(backend.releases.is_empty());
    assert_eq!(lifecycle.current().unwrap().resource, 1);

    // The next commit goes through normally
    lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap();
    assert_eq!(backend.releases, vec![1]);
}

#[test]
fn test_invalid_color_never_reaches_backend() {
    let mut backend = Recorder::default();
    let mut lifecycle = FieldLifecycle::from_config(&config(50));
    lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap();

    let mut bad = config(50);
    bad.params.inside_color = "#12345".into();
    let err = lifecycle.regenerate(&mut backend, "M", &bad).unwrap_err();

    assert!(matches!(
        err,
        FieldError::InvalidConfiguration {
            parameter: "insideColor",
            ..
        }
    ));
    assert_eq!(backend.builds, 1);
    assert_eq!(lifecycle.current().unwrap().resource, 1);
}

#[test]
fn test_blank_renderer_reports_glyph() {
    let mut backend = Recorder::default();
    let mut lifecycle: FieldLifecycle<u32> =
        FieldLifecycle::from_config(&config(50)).with_renderer(Blank);

    let err = lifecycle.regenerate(&mut backend, "M", &config(50)).unwrap_err();

    assert_eq!(err, FieldError::DegenerateInput { glyph: "M".into() });
    assert_eq!(lifecycle.state(), FieldState::Empty);
    assert_eq!(backend.builds, 0);
}
