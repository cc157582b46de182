//! Staging inbound and outbound bytes on a non-blocking socket.
//!
//! Run with:
//!     cargo run --example nonblocking_socket

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use chainbuf::ChainBuffer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    // Peer that sends a few lines slowly, half-closes, then collects the echoes
    let peer = thread::spawn(move || -> std::io::Result<Vec<u8>> {
        let mut stream = TcpStream::connect(addr)?;
        for i in 0..5 {
            writeln!(stream, "line {}", i)?;
            thread::sleep(Duration::from_millis(20));
        }
        stream.shutdown(Shutdown::Write)?;

        let mut echoed = Vec::new();
        stream.read_to_end(&mut echoed)?;
        Ok(echoed)
    });

    let (mut stream, _) = listener.accept()?;
    stream.set_nonblocking(true)?;

    let mut inbound = ChainBuffer::new();
    let mut outbound = ChainBuffer::new();

    loop {
        let outcome = inbound.add_from_reader(&mut stream, None)?;
        if outcome.read > 0 {
            println!("read {} bytes (eof={})", outcome.read, outcome.eof);
        }

        // Echo complete lines back in upper case
        while let Some(end) = inbound.find_str("\n") {
            let mut line = vec![0u8; end + 1];
            inbound.remove(&mut line);
            outbound.add(&line.to_ascii_uppercase())?;
        }

        // The peer reads only after it is done writing; whatever does not
        // fit in the send buffer stays queued for the next round
        let written = outbound.write_to(&mut stream, None)?;
        if written > 0 {
            println!("wrote {} bytes", written);
        }

        if outcome.eof {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    while !outbound.is_empty() {
        outbound.write_to(&mut stream, None)?;
        thread::sleep(Duration::from_millis(5));
    }
    drop(stream);

    let echoed = peer.join().expect("peer thread panicked")?;
    println!("peer closed, {} bytes echoed back", echoed.len());
    print!("{}", String::from_utf8_lossy(&echoed));
    Ok(())
}
