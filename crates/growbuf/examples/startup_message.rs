// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Assembles length-prefixed protocol messages with a `GrowableBuffer`.
//!
//! 1. We write a message body whose final size is not known up front.
//! 2. We write a header with the body length and take both out with `flush()`.
//! 3. The same buffer is reused for the next message without reallocating.

use growbuf::GrowableBuffer;

fn main() -> growbuf::Result<()> {
    let mut body = GrowableBuffer::new();
    let mut frame = GrowableBuffer::new();

    let startup = encode_startup(&mut body, &mut frame, "postgres", "inventory")?;
    println!("startup message: {} bytes: {startup:02x?}", startup.len());

    let query = encode_query(&mut body, &mut frame, "SELECT 1")?;
    println!("query message: {} bytes: {query:02x?}", query.len());

    println!("body buffer capacity after two messages: {} bytes", body.capacity());

    Ok(())
}

fn encode_startup(body: &mut GrowableBuffer, frame: &mut GrowableBuffer, user: &str, database: &str) -> growbuf::Result<Vec<u8>> {
    // Protocol version 3.0.
    body.write_i16_be(3)?.write_i16_be(0)?;

    for (key, value) in [("user", user), ("database", database)] {
        body.write_cstring(Some(key))?.write_cstring(Some(value))?;
    }

    body.write_u8(0)?;

    frame_message(body, frame, None)
}

fn encode_query(body: &mut GrowableBuffer, frame: &mut GrowableBuffer, sql: &str) -> growbuf::Result<Vec<u8>> {
    body.write_cstring(Some(sql))?;

    frame_message(body, frame, Some('Q'))
}

fn frame_message(body: &mut GrowableBuffer, frame: &mut GrowableBuffer, code: Option<char>) -> growbuf::Result<Vec<u8>> {
    let payload = body.flush();
    // An oversized payload saturates here and is then rejected by the range-checked write.
    let length = i64::try_from(payload.len() + 4).unwrap_or(i64::MAX);

    if let Some(code) = code {
        frame.write_char(code)?;
    }

    frame.write_i32_be(length)?.write(payload)?;

    Ok(frame.flush())
}
