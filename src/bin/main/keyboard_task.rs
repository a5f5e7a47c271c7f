use core::convert::Infallible;
use std::{io, thread};

use embassy_futures::block_on;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use log::{debug, info};
use speedread_core::input::{InputEvent, InputProvider};
use speedread_host::input::KeyboardInput;

const INPUT_QUEUE_DEPTH: usize = 32;

/// Key events from the keyboard thread to the UI loop.
pub(super) static INPUT: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH> =
    Channel::new();

/// Reads terminal key events on a dedicated thread until the event stream
/// fails, which is forwarded as an exit request.
pub(super) fn spawn_keyboard_reader() -> io::Result<()> {
    thread::Builder::new()
        .name("keyboard".to_owned())
        .spawn(|| forward_keys(&mut KeyboardInput::new()))?;
    Ok(())
}

fn forward_keys<IN>(keyboard: &mut IN)
where
    IN: InputProvider,
    IN::Error: core::fmt::Display,
{
    loop {
        match keyboard.poll_event() {
            Ok(Some(event)) => {
                if INPUT.try_send(event).is_err() {
                    debug!("keyboard: queue full, dropped {:?}", event);
                }
            }
            Ok(None) => {}
            Err(err) => {
                info!("keyboard: {}; requesting exit", err);
                // Waits for room so the exit request is never lost.
                block_on(INPUT.send(InputEvent::Exit));
                return;
            }
        }
    }
}

/// Non-blocking view of the queued key events.
pub(super) struct ChannelInput;

impl InputProvider for ChannelInput {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(INPUT.try_receive().ok())
    }
}
