//! Column-aligned rendering of send/awaited sequences.
//!
//! ```text
//! Send:    [ 1  , 3  , Any, Any, Any ]
//! Awaited: [ Any, Any, 1  , 2  , 3   ]
//! ```

use crate::vector::{Expected, Input};

/// Position of one column inside the rendered lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Offset in characters from the start of the line
    pub offset: usize,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub send: String,
    pub awaited: String,
    pub columns: Vec<Column>,
}

pub fn align(send: &[Input], awaited: &[Expected]) -> Alignment {
    let mut send_line = String::from("[ ");
    let mut awaited_line = String::from("[ ");
    let mut columns = Vec::with_capacity(send.len());
    let mut offset = 2;

    for (index, (input, expected)) in send.iter().zip(awaited).enumerate() {
        if index > 0 {
            send_line.push_str(", ");
            awaited_line.push_str(", ");
            offset += 2;
        }
        let left = input.to_string();
        let right = expected.to_string();
        let width = left.chars().count().max(right.chars().count());
        send_line.push_str(&format!("{:<width$}", left, width = width));
        awaited_line.push_str(&format!("{:<width$}", right, width = width));
        columns.push(Column { offset, width });
        offset += width;
    }

    if columns.is_empty() {
        send_line.push(']');
        awaited_line.push(']');
    } else {
        send_line.push_str(" ]");
        awaited_line.push_str(" ]");
    }

    Alignment {
        send: send_line,
        awaited: awaited_line,
        columns,
    }
}

/// Underline `column` with carets, shifted right by `indent` characters.
pub fn caret_line(column: Column, indent: usize) -> String {
    format!(
        "{}{}",
        " ".repeat(indent + column.offset),
        "^".repeat(column.width.max(1))
    )
}
