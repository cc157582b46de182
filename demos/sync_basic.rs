//! Basic buffer usage: append, search, consume.
//!
//! Run with:
//!     cargo run --example sync_basic

use chainbuf::ChainBuffer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = ChainBuffer::new();

    // Simulate a peer sending pipelined requests in odd-sized pieces
    let wire = "GET /a HTTP/1.1\r\nHost: x\r\n\r\nGET /b HTTP/1.1\r\nHost: x\r\n\r\n".repeat(40);
    for piece in wire.as_bytes().chunks(77) {
        buffer.add(piece)?;
    }

    println!(
        "Buffered {} bytes in {} segments ({} bytes allocated)\n",
        buffer.len(),
        buffer.segment_count(),
        buffer.capacity()
    );

    // Peel off complete requests
    let mut requests = 0;
    while let Some(end) = buffer.find_str("\r\n\r\n") {
        let mut request = vec![0u8; end + 4];
        buffer.remove(&mut request);
        requests += 1;

        if requests <= 2 {
            let first_line = request.split(|&b| b == b'\r').next().unwrap_or_default();
            println!("Request {}: {}", requests, String::from_utf8_lossy(first_line));
        }
    }

    println!("\nTotal: {} requests, {} bytes left over", requests, buffer.len());

    // Responses are formatted straight into the buffer
    buffer.add_fmt(format_args!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", 0))?;
    println!("Queued response of {} bytes", buffer.len());

    Ok(())
}
