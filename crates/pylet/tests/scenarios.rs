//! Black-box scenario tests against the public `run_source` API, covering
//! the eight evaluator scenarios.

use pylet::{run_source, CollectStringPrint};

fn run(source: &str) -> String {
    let mut out = CollectStringPrint::new();
    run_source(source, &mut out).unwrap();
    out.into_output()
}

#[test]
fn integer_arithmetic_exceeds_int64() {
    let source = "a = 1\ni = 0\nwhile i < 40:\n    a = a * 10\n    i = i + 1\nprint(a + 1)\n";
    assert_eq!(run(source), "10000000000000000000000000000000000000001\n");
}

#[test]
fn floor_division_semantics() {
    assert_eq!(run("print(-7 // 2)\nprint(-7 % 2)\n"), "-4\n1\n");
}

#[test]
fn chained_comparison_short_circuits() {
    assert_eq!(run("print(1 < 2 < 3)\n"), "True\n");
    assert_eq!(run("print(1 < 3 < 2)\n"), "False\n");
}

#[test]
fn function_with_default_and_early_return() {
    let source = "def f(x, y=10):\n    if x < 0:\n        return -1\n    return x + y\nprint(f(5))\nprint(f(5, 1))\nprint(f(-1))\n";
    assert_eq!(run(source), "15\n6\n-1\n");
}

#[test]
fn while_with_break_and_continue() {
    let source = "i = 0\ns = 0\nwhile i < 10:\n    i = i + 1\n    if i % 2 == 0:\n        continue\n    if i > 7:\n        break\n    s = s + i\nprint(s)\n";
    assert_eq!(run(source), "16\n");
}

#[test]
fn multi_target_assignment_and_multi_return() {
    let source = "def pair():\n    return 1, 2\na, b = pair()\nprint(a, b)\n";
    assert_eq!(run(source), "1 2\n");
}

#[test]
fn string_repetition_and_concatenation() {
    assert_eq!(run("print(\"ab\" * 3 + \"!\")\n"), "ababab!\n");
}

#[test]
fn fstring_interpolation() {
    assert_eq!(run("x = 7\nprint(f\"x={x*x}\")\n"), "x=49\n");
}

#[test]
fn a_equals_b_equals_c_binds_all_targets_to_the_same_value() {
    assert_eq!(run("a = b = c = 3\nprint(a, b, c)\n"), "3 3 3\n");
}

#[test]
fn augmented_assignment_reads_then_rebinds() {
    assert_eq!(run("x = 5\nx += 3\nx *= 2\nprint(x)\n"), "16\n");
}

#[test]
fn augmented_assignment_evaluates_rhs_before_reading_current_value() {
    let source = "x = 1\ndef f():\n    x = 99\n    return 5\nx += f()\nprint(x)\n";
    assert_eq!(run(source), "104\n");
}

#[test]
fn global_is_visible_inside_a_call_but_caller_locals_are_not() {
    let source = "g = 1\ndef f():\n    return g\nprint(f())\n";
    assert_eq!(run(source), "1\n");
}

#[test]
fn recursive_function_calls_work() {
    let source = "def fact(n):\n    if n <= 1:\n        return 1\n    return n * fact(n - 1)\nprint(fact(10))\n";
    assert_eq!(run(source), "3628800\n");
}

#[test]
fn braces_escape_in_fstrings() {
    assert_eq!(run("print(f\"{{literal}}\")\n"), "{literal}\n");
}

#[test]
fn bool_true_false_and_none_print_titlecase() {
    assert_eq!(run("print(True, False, None)\n"), "True False None\n");
}
