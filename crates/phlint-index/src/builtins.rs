//! Seeded PHP standard-library symbols.
//!
//! The set is deliberately a subset: the classes, interfaces, and
//! functions that project code references all the time. Built-ins carry
//! an empty range since they have no source file.

use text_size::TextRange;

use crate::defs::{Symbol, SymbolKind};
use crate::index::SymbolIndex;

impl SymbolIndex {
    pub(crate) fn register_builtins(&mut self) {
        self.register_core_interfaces();
        self.register_core_classes();
        self.register_exceptions();
        self.register_date_time();
        self.register_spl();
        self.register_functions();
    }

    fn register_many(&mut self, kind: SymbolKind, names: &[&str]) {
        for name in names {
            self.add_symbol(Symbol::new(*name, kind, TextRange::default()));
        }
    }

    fn register_core_interfaces(&mut self) {
        self.register_many(
            SymbolKind::Interface,
            &[
                "Traversable",
                "Iterator",
                "IteratorAggregate",
                "ArrayAccess",
                "Countable",
                "Serializable",
                "Stringable",
                "JsonSerializable",
                "Throwable",
                "UnitEnum",
                "BackedEnum",
                "DateTimeInterface",
            ],
        );
    }

    fn register_core_classes(&mut self) {
        self.register_many(
            SymbolKind::Class,
            &[
                "stdClass",
                "Closure",
                "Generator",
                "WeakMap",
                "WeakReference",
                "ArrayObject",
                "ArrayIterator",
            ],
        );
    }

    fn register_exceptions(&mut self) {
        self.register_many(
            SymbolKind::Class,
            &[
                "Exception",
                "ErrorException",
                "Error",
                "TypeError",
                "ValueError",
                "ArgumentCountError",
                "ArithmeticError",
                "DivisionByZeroError",
                "RuntimeException",
                "LogicException",
                "InvalidArgumentException",
                "DomainException",
                "LengthException",
                "OutOfBoundsException",
                "OutOfRangeException",
                "RangeException",
                "OverflowException",
                "UnderflowException",
                "UnexpectedValueException",
                "BadFunctionCallException",
                "BadMethodCallException",
                "JsonException",
            ],
        );
    }

    fn register_date_time(&mut self) {
        self.register_many(
            SymbolKind::Class,
            &[
                "DateTime",
                "DateTimeImmutable",
                "DateTimeZone",
                "DateInterval",
                "DatePeriod",
            ],
        );
    }

    fn register_spl(&mut self) {
        self.register_many(
            SymbolKind::Class,
            &[
                "SplFileInfo",
                "SplFileObject",
                "SplTempFileObject",
                "SplDoublyLinkedList",
                "SplStack",
                "SplQueue",
                "SplHeap",
                "SplMinHeap",
                "SplMaxHeap",
                "SplPriorityQueue",
                "SplFixedArray",
                "SplObjectStorage",
            ],
        );
        self.register_many(SymbolKind::Interface, &["SplObserver", "SplSubject"]);
    }

    fn register_functions(&mut self) {
        self.register_many(
            SymbolKind::Function,
            &[
                "strlen",
                "strpos",
                "str_replace",
                "str_contains",
                "str_starts_with",
                "str_ends_with",
                "substr",
                "sprintf",
                "implode",
                "explode",
                "trim",
                "ltrim",
                "rtrim",
                "strtolower",
                "strtoupper",
                "ucfirst",
                "count",
                "array_map",
                "array_filter",
                "array_merge",
                "array_keys",
                "array_values",
                "array_key_exists",
                "array_reduce",
                "array_slice",
                "array_search",
                "in_array",
                "sort",
                "usort",
                "ksort",
                "is_string",
                "is_array",
                "is_int",
                "is_bool",
                "is_float",
                "is_null",
                "is_callable",
                "is_object",
                "get_class",
                "class_exists",
                "function_exists",
                "file_exists",
                "file_get_contents",
                "file_put_contents",
                "json_encode",
                "json_decode",
                "preg_match",
                "preg_match_all",
                "preg_replace",
                "preg_split",
            ],
        );
    }
}
