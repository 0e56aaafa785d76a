//! Exception classes and instances.
//!
//! The class set is closed: scripts can raise and catch these, but cannot
//! define new ones. Each class has a single parent.

use std::fmt;

/// Built-in exception class.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExceptionKind {
    BaseException,
    SystemExit,
    KeyboardInterrupt,
    Exception,
    StopIteration,
    StandardError,
    ArithmeticError,
    FloatingPointError,
    OverflowError,
    ZeroDivisionError,
    AssertionError,
    AttributeError,
    ImportError,
    IOError,
    LookupError,
    IndexError,
    KeyError,
    NameError,
    RuntimeError,
    NotImplementedError,
    RecursionError,
    SyntaxError,
    TypeError,
    ValueError,
}

impl ExceptionKind {
    /// Every class, in declaration order.
    pub const ALL: [ExceptionKind; 24] = [
        Self::BaseException,
        Self::SystemExit,
        Self::KeyboardInterrupt,
        Self::Exception,
        Self::StopIteration,
        Self::StandardError,
        Self::ArithmeticError,
        Self::FloatingPointError,
        Self::OverflowError,
        Self::ZeroDivisionError,
        Self::AssertionError,
        Self::AttributeError,
        Self::ImportError,
        Self::IOError,
        Self::LookupError,
        Self::IndexError,
        Self::KeyError,
        Self::NameError,
        Self::RuntimeError,
        Self::NotImplementedError,
        Self::RecursionError,
        Self::SyntaxError,
        Self::TypeError,
        Self::ValueError,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseException => "BaseException",
            Self::SystemExit => "SystemExit",
            Self::KeyboardInterrupt => "KeyboardInterrupt",
            Self::Exception => "Exception",
            Self::StopIteration => "StopIteration",
            Self::StandardError => "StandardError",
            Self::ArithmeticError => "ArithmeticError",
            Self::FloatingPointError => "FloatingPointError",
            Self::OverflowError => "OverflowError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::AssertionError => "AssertionError",
            Self::AttributeError => "AttributeError",
            Self::ImportError => "ImportError",
            Self::IOError => "IOError",
            Self::LookupError => "LookupError",
            Self::IndexError => "IndexError",
            Self::KeyError => "KeyError",
            Self::NameError => "NameError",
            Self::RuntimeError => "RuntimeError",
            Self::NotImplementedError => "NotImplementedError",
            Self::RecursionError => "RecursionError",
            Self::SyntaxError => "SyntaxError",
            Self::TypeError => "TypeError",
            Self::ValueError => "ValueError",
        }
    }

    /// Direct superclass; `None` for the root.
    pub const fn parent(self) -> Option<ExceptionKind> {
        match self {
            Self::BaseException => None,
            Self::SystemExit | Self::KeyboardInterrupt | Self::Exception => {
                Some(Self::BaseException)
            }
            Self::StopIteration | Self::StandardError => Some(Self::Exception),
            Self::ArithmeticError
            | Self::AssertionError
            | Self::AttributeError
            | Self::ImportError
            | Self::IOError
            | Self::LookupError
            | Self::NameError
            | Self::RuntimeError
            | Self::SyntaxError
            | Self::TypeError
            | Self::ValueError => Some(Self::StandardError),
            Self::FloatingPointError | Self::OverflowError | Self::ZeroDivisionError => {
                Some(Self::ArithmeticError)
            }
            Self::IndexError | Self::KeyError => Some(Self::LookupError),
            Self::NotImplementedError | Self::RecursionError => Some(Self::RuntimeError),
        }
    }

    /// Whether `self` is `other` or derives from it.
    pub fn is_subclass_of(self, other: ExceptionKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raised exception instance.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Exception {
    pub kind: ExceptionKind,
    pub message: String,
}

impl Exception {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Exception {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(self.kind.name())
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}
