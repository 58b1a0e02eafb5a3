use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::{thread, time::Duration};

static POLL_DURATION: Duration = Duration::from_millis(1000);

///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
	Key(KeyEvent),
	Resize,
}

/// polls the terminal on its own thread and forwards key presses
pub struct Input {
	receiver: Receiver<InputEvent>,
}

impl Input {
	///
	pub fn new() -> Self {
		let (tx, rx) = unbounded();

		thread::spawn(move || {
			if let Err(e) = Self::input_loop(&tx) {
				log::error!("input thread error: {}", e);
			}
		});

		Self { receiver: rx }
	}

	///
	pub fn receiver(&self) -> Receiver<InputEvent> {
		self.receiver.clone()
	}

	fn input_loop(tx: &Sender<InputEvent>) -> Result<()> {
		loop {
			let ev = match Self::poll(POLL_DURATION)? {
				Some(Event::Key(key))
					if key.kind == KeyEventKind::Press =>
				{
					InputEvent::Key(key)
				}
				Some(Event::Resize(..)) => InputEvent::Resize,
				_ => continue,
			};

			// receiver gone means the app is shutting down
			if tx.send(ev).is_err() {
				return Ok(());
			}
		}
	}

	fn poll(dur: Duration) -> Result<Option<Event>> {
		if event::poll(dur)? {
			Ok(Some(event::read()?))
		} else {
			Ok(None)
		}
	}
}
