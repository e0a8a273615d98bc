//! First-in first-out queue of iterables.
//!
//! The generator yields the elements of every iterable it has received, in
//! order. A non-`None` input enqueues another iterable. It finishes once the
//! last element has been yielded and the following input adds nothing.

use super::{fixed_then_random, not_started_error};
use crate::coroutine::{Coroutine, Exception, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{TestVector, VectorStream};
use rand::Rng;
use std::collections::VecDeque;

pub struct ChainQueue;

impl Task for ChainQueue {
    fn name(&self) -> &'static str {
        "TaskChainQueue"
    }

    fn title(&self) -> &'static str {
        "Queue of iterators"
    }

    fn complexity(&self) -> u32 {
        15
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(ChainQueueGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        let keys = Value::Dict(vec![
            (Value::Int(1), Value::from("a")),
            (Value::from(""), Value::from("b")),
            (Value::Int(12), Value::from("c")),
        ]);
        let fixed = vec![
            TestVector::new()
                .step(
                    Value::list([Value::Int(123), Value::from("Values"), Value::from("1")]),
                    123,
                )
                .step((), "Values")
                .step(
                    Value::tuple([Value::Int(2), Value::Float(2.3), Value::Bool(false)]),
                    "1",
                )
                .step((), 2)
                .step((), 2.3)
                .step((), false),
            TestVector::new()
                .step(Value::list([Value::Int(12)]), 12)
                .step(Value::list([Value::Int(1)]), 1),
            TestVector::new()
                .step(Value::tuple([Value::Int(5)]), 5)
                .step(Value::list([Value::Int(23)]), 23)
                .step("123", "1")
                .step((), "2")
                .step((), "3"),
            TestVector::new().step(keys, 1).step((), "").step((), 12),
        ];
        fixed_then_random(fixed, random_vector)
    }

    fn short_description(&self) -> &'static [&'static str] {
        &[
            "Lists are sent to the generator. The task is to yield the elements \
             of every list received.",
            "A list may arrive at any step of the generator",
            "The generator is done once it has yielded the last element of all \
             lists WITHOUT receiving another list. For example:",
            "for input [['a', 'a'], None] the output must be ['a', 'a'], but",
            "for input [['a', 'a'], None, ['a']] the output must be ['a', 'a', 'a']",
        ]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

fn random_objects<R: Rng>(rng: &mut R) -> Vec<Value> {
    (0..rng.gen_range(1..=4)).map(|_| Value::object()).collect()
}

/// Lists of fresh objects interleaved with enough `None`s to drain the queue
/// exactly when the last element is yielded.
fn random_vector() -> TestVector {
    let mut rng = rand::thread_rng();
    let first = random_objects(&mut rng);
    let mut send = vec![Value::List(first.clone())];
    let mut awaited = first.clone();
    let mut left = first.len();

    for _ in 0..rng.gen_range(1..=4) {
        let pause = rng.gen_range(0..left);
        left -= pause;
        send.extend(std::iter::repeat(Value::None).take(pause));
        let list = random_objects(&mut rng);
        left += list.len() - 1;
        send.push(Value::List(list.clone()));
        awaited.extend(list);
    }
    send.extend(std::iter::repeat(Value::None).take(left - 1));

    let mut vector = TestVector::new();
    for (input, expected) in send.into_iter().zip(awaited) {
        vector.push(input, expected);
    }
    vector
}

enum ChainQueueGenerator {
    Fresh,
    AwaitFirst,
    Draining {
        current: VecDeque<Value>,
        queue: VecDeque<Value>,
    },
    Done,
}

fn not_iterable(value: &Value) -> Exception {
    Exception::type_error(format!("'{}' object is not iterable", value.type_name()))
}

/// Yield the next element, pulling iterables off the queue as needed.
fn advance(
    mut current: VecDeque<Value>,
    mut queue: VecDeque<Value>,
) -> (ChainQueueGenerator, Outcome) {
    loop {
        if let Some(element) = current.pop_front() {
            return (
                ChainQueueGenerator::Draining { current, queue },
                Outcome::Yielded(element),
            );
        }
        let Some(iterable) = queue.pop_front() else {
            return (ChainQueueGenerator::Done, Outcome::Finished);
        };
        match iterable.iter_items() {
            Some(items) => current = items.into(),
            None => {
                return (
                    ChainQueueGenerator::Done,
                    Outcome::Raised(not_iterable(&iterable)),
                )
            }
        }
    }
}

impl Coroutine for ChainQueueGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, ChainQueueGenerator::Done);
        let (next, outcome) = match state {
            ChainQueueGenerator::Fresh if !input.is_none() => {
                (ChainQueueGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            ChainQueueGenerator::Fresh => {
                (ChainQueueGenerator::AwaitFirst, Outcome::Yielded(Value::None))
            }
            ChainQueueGenerator::AwaitFirst => advance(VecDeque::new(), VecDeque::from([input])),
            ChainQueueGenerator::Draining { current, mut queue } => {
                if !input.is_none() {
                    queue.push_back(input);
                }
                advance(current, queue)
            }
            ChainQueueGenerator::Done => (ChainQueueGenerator::Done, Outcome::Finished),
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = ChainQueueGenerator::Done;
    }
}
