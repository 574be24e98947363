//! Element decoding.

use std::io::{Read, Seek};

use abif_common::ByteCursor;

use crate::types::ElementType;
use crate::value::{Date, Thumb, Time, Value};
use crate::{Error, Result};

/// Upper bound on up-front allocation; larger arrays grow as they are read.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Decode `num_elements` elements of `element_type` at the cursor.
///
/// The cursor must already be at the entry's effective data location.
/// Exactly the bytes implied by the type and count are consumed. User types
/// yield [`Value::Unsupported`] without reading; unknown types fail.
pub fn decode<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    element_type: ElementType,
    num_elements: i32,
) -> Result<Value> {
    let offset = cursor.tell();
    // Only the fixed-width kinds consult the element count.
    let count = || {
        usize::try_from(num_elements).map_err(|_| Error::NegativeCount {
            count: num_elements,
            offset,
        })
    };

    let value = match element_type {
        ElementType::Byte => one_or_many(read_n(cursor, count()?, |c| c.read_u8())?, Value::Byte, Value::Bytes),
        ElementType::Char => Value::Text(cursor.read_fixed_string(count()?)?),
        ElementType::Word => one_or_many(read_n(cursor, count()?, |c| c.read_u32())?, Value::Word, Value::Words),
        ElementType::Short => one_or_many(read_n(cursor, count()?, |c| c.read_i16())?, Value::Short, Value::Shorts),
        ElementType::Long => one_or_many(read_n(cursor, count()?, |c| c.read_i32())?, Value::Long, Value::Longs),
        ElementType::Float => one_or_many(read_n(cursor, count()?, |c| c.read_f32())?, Value::Float, Value::Floats),
        ElementType::Double => one_or_many(read_n(cursor, count()?, |c| c.read_f64())?, Value::Double, Value::Doubles),
        ElementType::Date => one_or_many(read_n(cursor, count()?, read_date)?, Value::Date, Value::Dates),
        ElementType::Time => one_or_many(read_n(cursor, count()?, read_time)?, Value::Time, Value::Times),
        ElementType::Thumb => one_or_many(read_n(cursor, count()?, read_thumb)?, Value::Thumb, Value::Thumbs),
        ElementType::Bool => one_or_many(
            read_n(cursor, count()?, |c| c.read_u8().map(|b| b != 0))?,
            Value::Bool,
            Value::Bools,
        ),
        ElementType::PString => {
            let length = cursor.read_u8()?;
            Value::Text(cursor.read_fixed_string(usize::from(length))?)
        }
        ElementType::CString => Value::Text(read_cstring(cursor)?),
        ElementType::User(element_type) => Value::Unsupported { element_type },
        ElementType::Unknown(element_type) => {
            return Err(Error::UnknownElementType {
                element_type,
                offset,
            })
        }
    };

    Ok(value)
}

/// Collapse a single element to its scalar variant.
fn one_or_many<T>(mut values: Vec<T>, one: fn(T) -> Value, many: fn(Vec<T>) -> Value) -> Value {
    if values.len() == 1 {
        if let Some(value) = values.pop() {
            return one(value);
        }
    }
    many(values)
}

fn read_n<R, T, F>(cursor: &mut ByteCursor<R>, count: usize, mut read: F) -> Result<Vec<T>>
where
    R: Read + Seek,
    F: FnMut(&mut ByteCursor<R>) -> abif_common::Result<T>,
{
    let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        values.push(read(cursor)?);
    }
    Ok(values)
}

fn read_date<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> abif_common::Result<Date> {
    Ok(Date {
        year: cursor.read_i16()?,
        month: cursor.read_u8()?,
        day: cursor.read_u8()?,
    })
}

fn read_time<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> abif_common::Result<Time> {
    Ok(Time {
        hour: cursor.read_u8()?,
        minute: cursor.read_u8()?,
        second: cursor.read_u8()?,
        hundredth: cursor.read_u8()?,
    })
}

fn read_thumb<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> abif_common::Result<Thumb> {
    Ok(Thumb {
        d: cursor.read_i32()?,
        u: cursor.read_i32()?,
        c: cursor.read_u8()?,
        n: cursor.read_u8()?,
    })
}

/// Read characters one at a time up to (and consuming) a zero byte.
fn read_cstring<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> abif_common::Result<String> {
    let mut text = String::new();
    loop {
        match cursor.read_u8()? {
            0 => return Ok(text),
            b => text.push(char::from(b)),
        }
    }
}
