use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use log::info;
use wsframe::ws::{FrameEncoder, IntoFrameDecoder, Role};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let server = thread::spawn(move || -> anyhow::Result<Vec<u8>> {
        let (stream, peer) = listener.accept()?;
        info!("accepted connection from {peer}");
        let mut decoder = stream.into_frame_decoder(Role::Server);
        let mut payload = Vec::new();
        decoder.read_to_end(&mut payload)?;
        Ok(payload)
    });

    let message = "the quick brown fox jumps over the lazy dog ".repeat(1000);
    let mut encoder = FrameEncoder::with_max_chunk_size(TcpStream::connect(addr)?, Role::Client, 1024)?;
    info!("sending {} bytes with mask key {:02x?}", message.len(), encoder.mask_key());
    encoder.write_all(message.as_bytes())?;
    encoder.flush()?;
    drop(encoder);

    let received = server.join().map_err(|_| anyhow::anyhow!("server thread panicked"))??;
    info!("received {} bytes", received.len());
    anyhow::ensure!(received == message.as_bytes(), "payload mismatch");
    println!("round trip of {} bytes completed", received.len());
    Ok(())
}
