//! Builds a format 0 PIN block and reads the PIN back.

use pinblock_core::{decrypt_pin_block, encrypt_pin_block, trace_pin_block, Format};

fn main() {
    let pan = "5364146259585156";
    let key_hex = "0123456789ABCDEF0123456789ABCDEF";

    let trace = trace_pin_block(Format::Iso0, "5810", pan, key_hex).unwrap();
    println!("padded PIN : {}", trace.padded_pin);
    println!("shifted PAN: {}", trace.shifted_pan);
    println!("clear block: {}", trace.clear_block);
    println!("PIN block  : {}", trace.pin_block);

    let block = encrypt_pin_block(Format::Iso0, "5810", pan, key_hex).unwrap();
    assert_eq!(block, trace.pin_block);
    let pin = decrypt_pin_block(Format::Iso0, pan, key_hex, &block).unwrap();
    assert_eq!(pin, "5810");

    println!("example succeeded; PIN recovered from block");
}
