//! Typewriter reveal of the hero subtitle.

use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use gloo::timers::future::TimeoutFuture;
use log::info;

use crate::config::TypewriterConfig;
use crate::dom;

/// Character-by-character reveal of a fixed string.
#[derive(Clone, Debug)]
pub struct Typewriter {
	chars: Vec<char>,
	shown: usize,
}

impl Typewriter {
	/// Nothing shown yet.
	pub fn new(text: &str) -> Self {
		Self {
			chars: text.chars().collect(),
			shown: 0,
		}
	}

	/// Reveal one more character and return the visible text, or `None`
	/// once everything is shown.
	pub fn step(&mut self) -> Option<String> {
		if self.is_done() {
			return None;
		}
		self.shown += 1;
		Some(self.visible())
	}

	/// Text revealed so far.
	pub fn visible(&self) -> String {
		self.chars[..self.shown].iter().collect()
	}

	/// Whether every character is shown.
	pub fn is_done(&self) -> bool {
		self.shown >= self.chars.len()
	}
}

/// Stops a running typewriter. Dropping the handle lets the effect finish.
pub struct TypewriterHandle {
	abort: AbortHandle,
}

impl TypewriterHandle {
	/// Wrap `task` so that [`TypewriterHandle::cancel`] stops it at its next
	/// suspension point.
	pub fn wrap<F: Future>(task: F) -> (Self, Abortable<F>) {
		let (abort, registration) = AbortHandle::new_pair();
		(Self { abort }, Abortable::new(task, registration))
	}

	/// Stop typing. Text already shown stays.
	pub fn cancel(&self) {
		self.abort.abort();
	}
}

/// Suspends the typewriter between characters.
pub trait Sleeper {
	/// Resolve after `ms` milliseconds.
	fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Browser timers.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSleeper;

impl Sleeper for TimerSleeper {
	async fn sleep(&self, ms: u32) {
		TimeoutFuture::new(ms).await;
	}
}

/// Type `text` out through `show`, then call `remove_cursor`.
///
/// Waits `start_delay_ms` before the first character, `interval_ms` between
/// characters and `cursor_delay_ms` after the last one.
pub async fn run<D, F, C>(text: &str, config: &TypewriterConfig, sleeper: &D, mut show: F, remove_cursor: C)
where
	D: Sleeper,
	F: FnMut(&str),
	C: FnOnce(),
{
	let mut writer = Typewriter::new(text);
	sleeper.sleep(config.start_delay_ms).await;
	while let Some(visible) = writer.step() {
		show(&visible);
		if !writer.is_done() {
			sleeper.sleep(config.interval_ms).await;
		}
	}
	sleeper.sleep(config.cursor_delay_ms).await;
	remove_cursor();
}

/// Start the effect on the first matching element, if any.
pub fn wire_typewriter(config: &TypewriterConfig) -> Option<TypewriterHandle> {
	let el = dom::query(&config.selector)?;
	let text = el.text_content().unwrap_or_default();
	el.set_text_content(Some(""));
	let _ = el.style().set_property("border-right", &config.cursor_style);

	let config = config.clone();
	let (handle, task) = TypewriterHandle::wrap(async move {
		run(
			&text,
			&config,
			&TimerSleeper,
			|visible| el.set_text_content(Some(visible)),
			|| {
				let _ = el.style().set_property("border-right", "none");
			},
		)
		.await
	});
	leptos::task::spawn_local(async move {
		if task.await.is_err() {
			info!("folio-fx: typewriter cancelled");
		}
	});
	Some(handle)
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use futures::executor::block_on;

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	enum Step {
		Sleep(u32),
		Show(String),
		CursorRemoved,
	}

	/// Resolves immediately and records each requested delay.
	struct RecordingSleeper<'a>(&'a RefCell<Vec<Step>>);

	impl Sleeper for RecordingSleeper<'_> {
		async fn sleep(&self, ms: u32) {
			self.0.borrow_mut().push(Step::Sleep(ms));
		}
	}

	fn typed(text: &str, config: &TypewriterConfig) -> Vec<Step> {
		let steps = RefCell::new(Vec::new());
		block_on(run(
			text,
			config,
			&RecordingSleeper(&steps),
			|visible| steps.borrow_mut().push(Step::Show(visible.to_string())),
			|| steps.borrow_mut().push(Step::CursorRemoved),
		));
		steps.into_inner()
	}

	#[test]
	fn waits_before_between_and_after_characters() {
		assert_eq!(
			typed("abc", &TypewriterConfig::default()),
			vec![
				Step::Sleep(1000),
				Step::Show("a".into()),
				Step::Sleep(100),
				Step::Show("ab".into()),
				Step::Sleep(100),
				Step::Show("abc".into()),
				Step::Sleep(500),
				Step::CursorRemoved,
			]
		);
	}

	#[test]
	fn empty_text_only_removes_cursor() {
		assert_eq!(
			typed("", &TypewriterConfig::default()),
			vec![Step::Sleep(1000), Step::Sleep(500), Step::CursorRemoved]
		);
	}

	#[test]
	fn cancelled_typewriter_stops_typing() {
		let steps = RefCell::new(Vec::new());
		let config = TypewriterConfig::default();
		let sleeper = RecordingSleeper(&steps);
		let (handle, task) = TypewriterHandle::wrap(run(
			"abc",
			&config,
			&sleeper,
			|visible| steps.borrow_mut().push(Step::Show(visible.to_string())),
			|| steps.borrow_mut().push(Step::CursorRemoved),
		));
		handle.cancel();
		assert!(block_on(task).is_err());
		assert!(steps.borrow().is_empty());
	}

	#[test]
	fn total_delay_follows_config() {
		let config = TypewriterConfig {
			start_delay_ms: 10,
			interval_ms: 3,
			cursor_delay_ms: 7,
			..TypewriterConfig::default()
		};
		let waited: u32 = typed("hello", &config)
			.iter()
			.filter_map(|s| match s {
				Step::Sleep(ms) => Some(*ms),
				_ => None,
			})
			.sum();
		assert_eq!(waited, 10 + 4 * 3 + 7);
	}

	#[test]
	fn reveals_one_char_per_step() {
		let mut writer = Typewriter::new("Hi!");
		assert_eq!(writer.visible(), "");
		assert_eq!(writer.step().as_deref(), Some("H"));
		assert_eq!(writer.step().as_deref(), Some("Hi"));
		assert!(!writer.is_done());
		assert_eq!(writer.step().as_deref(), Some("Hi!"));
		assert!(writer.is_done());
		assert_eq!(writer.step(), None);
	}

	#[test]
	fn steps_by_character_not_byte() {
		let mut writer = Typewriter::new("né");
		assert_eq!(writer.step().as_deref(), Some("n"));
		assert_eq!(writer.step().as_deref(), Some("né"));
		assert_eq!(writer.step(), None);
	}

	#[test]
	fn empty_text_is_done_immediately() {
		let mut writer = Typewriter::new("");
		assert!(writer.is_done());
		assert_eq!(writer.step(), None);
	}
}
