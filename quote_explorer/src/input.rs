//! Background readers that turn input into `AppEvent`s for the event loop.
use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{debug, info, warn};

use crate::command::parse_line;
use crate::model::event::AppEvent;

/// Reads line commands and forwards them to the event loop.
pub struct CommandReader;

impl CommandReader {
    /// Spawn a thread that parses each line of `reader` and sends the resulting event.
    ///
    /// Lines that fail to parse are logged and skipped. The thread stops at end of input,
    /// on a read error, or when the loop has dropped its receiver; dropping `tx` then tells
    /// the loop that no more events will come.
    pub fn start<R>(reader: R, tx: Sender<AppEvent>) -> JoinHandle<()>
    where
        R: BufRead + Send + 'static,
    {
        thread::spawn(move || {
            for line_result in reader.lines() {
                let line = match line_result {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Read input error: {}", e);
                        break;
                    }
                };
                match parse_line(&line) {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            debug!("Event loop gone, stopping reader");
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Skipping {:?}: {}", line.trim(), e),
                }
            }
            info!("End of input");
        })
    }

    /// Spawn a thread that replays already-parsed events.
    pub fn replay(events: Vec<AppEvent>, tx: Sender<AppEvent>) -> JoinHandle<()> {
        thread::spawn(move || {
            for event in events {
                if tx.send(event).is_err() {
                    break;
                }
            }
        })
    }
}
