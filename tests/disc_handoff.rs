//! Selector to emulator disc hand-off

use disc_selector::config::keycode;
use disc_selector::mock::{MemFs, ScriptedKeys};
use disc_selector::{DiscError, DiscImage, KeyEvent, KeySource, SelectorConfig, run_selector};

static BUILTIN: [u8; 32] = [0x4C; 32];

fn card() -> MemFs {
    let mut fs = MemFs::new();
    fs.add_dir("/Disks");
    fs.add_file_with("/Disks/Boot.dsk", &[0u8; 1024]);
    fs.add_file("/Disks/Games.dsk", 2048);
    fs
}

#[test]
fn selected_file_becomes_card_disc() {
    let mut fs = card();
    let config = SelectorConfig::default();
    let mut fb = vec![0u8; config.framebuffer_len()];
    let mut keys = ScriptedKeys::new()
        .tap(keycode::DOWN)
        .tap(keycode::RETURN)
        .tap(keycode::DOWN)
        .tap(keycode::ENTER);

    let mut disc = run_selector(&mut fs, &mut fb, &mut keys, config, &BUILTIN, || {});
    assert!(!disc.is_builtin());
    assert!(!disc.is_read_only());
    assert_eq!(disc.size(), 1024);

    disc.write_at(100, b"MFS").unwrap();
    let mut buf = [0u8; 5];
    disc.read_at(99, &mut buf).unwrap();
    assert_eq!(&buf, b"\0MFS\0");

    // Writes land in the card file
    let DiscImage::Card(card_disc) = disc else {
        panic!("expected card disc");
    };
    assert_eq!(&card_disc.into_inner().contents()[100..103], b"MFS");
    assert_eq!(fs.open_dir_count(), 0);
}

#[test]
fn cancel_falls_back_to_builtin() {
    let mut fs = card();
    let config = SelectorConfig::default();
    let mut fb = vec![0u8; config.framebuffer_len()];
    let mut keys = ScriptedKeys::new()
        .tap(keycode::DOWN)
        .tap(keycode::RETURN)
        .tap(keycode::ESCAPE);

    let mut disc = run_selector(&mut fs, &mut fb, &mut keys, config, &BUILTIN, || {});
    assert!(disc.is_builtin());
    assert_eq!(disc.size(), 32);
    assert_eq!(disc.write_at(0, &[1]), Err(DiscError::ReadOnly));

    let mut buf = [0u8; 2];
    disc.read_at(30, &mut buf).unwrap();
    assert_eq!(buf, [0x4C, 0x4C]);
    assert_eq!(fs.open_dir_count(), 0);
}

#[test]
fn missing_card_falls_back_to_builtin() {
    let mut fs = MemFs::new();
    fs.fail_open_dir("");
    let config = SelectorConfig::default();
    let mut fb = vec![0u8; config.framebuffer_len()];
    let mut keys = ScriptedKeys::new();

    let mut idle_calls = 0;
    let disc = run_selector(&mut fs, &mut fb, &mut keys, config, &BUILTIN, || idle_calls += 1);
    assert!(disc.is_builtin());
    assert_eq!(idle_calls, 0);
}

#[test]
fn unopenable_file_falls_back_to_builtin() {
    let mut fs = card();
    fs.add_read_only_file("/Locked.dsk", 64);
    let config = SelectorConfig::default();
    let mut fb = vec![0u8; config.framebuffer_len()];
    let mut keys = ScriptedKeys::new()
        .taps(keycode::DOWN, 2)
        .tap(keycode::RETURN);

    let disc = run_selector(&mut fs, &mut fb, &mut keys, config, &BUILTIN, || {});
    assert!(disc.is_builtin());
}

#[test]
fn idle_runs_until_a_key_arrives() {
    let mut fs = card();
    let config = SelectorConfig::default();
    let mut fb = vec![0u8; config.framebuffer_len()];
    let mut keys = DelayedKeys {
        empty_polls: 3,
        inner: ScriptedKeys::new().tap(keycode::ESCAPE),
    };

    let mut idle_calls = 0;
    let disc = run_selector(&mut fs, &mut fb, &mut keys, config, &BUILTIN, || idle_calls += 1);
    assert!(disc.is_builtin());
    assert_eq!(idle_calls, 4);
}

/// Reports an empty queue a few times before handing out scripted keys
struct DelayedKeys {
    empty_polls: usize,
    inner: ScriptedKeys,
}

impl KeySource for DelayedKeys {
    fn pop(&mut self) -> Option<KeyEvent> {
        if self.empty_polls > 0 {
            self.empty_polls -= 1;
            return None;
        }
        self.inner.pop()
    }
}
