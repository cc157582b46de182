//! Async fill and flush over a tokio duplex pipe.
//!
//! Run with:
//!     cargo run --example async_duplex --features async-io

use chainbuf::ChainBuffer;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (client, server) = tokio::io::duplex(1024);

    // Producer writes 64 KiB through a 1 KiB pipe, then closes
    let producer = tokio::spawn(async move {
        let mut client = client;
        let block = vec![0x5Au8; 4096];
        for _ in 0..16 {
            client.write_all(&block).await?;
        }
        client.shutdown().await
    });

    let mut server = server.compat();
    let mut buffer = ChainBuffer::new();
    let mut fills = 0;

    loop {
        let outcome = buffer.add_from_async_reader(&mut server, None).await?;
        fills += 1;
        if outcome.eof {
            break;
        }
    }

    producer.await??;
    println!(
        "received {} bytes in {} fills, {} segments",
        buffer.len(),
        fills,
        buffer.segment_count()
    );

    let mut sink: Vec<u8> = Vec::new();
    let written = buffer.write_to_async(&mut sink, None).await?;
    println!("flushed {} bytes", written);

    Ok(())
}
