//! Static line templates, grouped by defect family and noise family.
//!
//! Hole names used across the catalog:
//! `ptr_var`, `int_var`, `ok_var`, `mutex_var`, `cond_var`, `str_var1`,
//! `str_var2`, `var`, `_var` (identifiers) and `int_num`, `init_num`, `_num`,
//! `op` (literals and operators).

use crate::template::LineTemplate;

const fn t(source: &'static str) -> LineTemplate {
    LineTemplate::new(source)
}

/// Upper bound for integer literals substituted into templates.
pub const MAX_INT: u32 = 10;

// Memory management

pub const PTR_ACCESS_LINE: LineTemplate = t("*$ptr_var = $int_num;");

/// Allocation lines followed by the matching `free`.
#[derive(Debug, Clone, Copy)]
pub struct MemorySkeleton {
    pub setup: &'static [LineTemplate],
    pub free: LineTemplate,
}

/// Two equivalent allocate/free skeletons.
pub const MEMORY_MANAGEMENT_SKELETONS: [MemorySkeleton; 2] = [
    MemorySkeleton {
        setup: &[t("int *$ptr_var;"), t("$ptr_var = malloc(sizeof(int));")],
        free: t("free($ptr_var);"),
    },
    MemorySkeleton {
        setup: &[t("int *$ptr_var = malloc(sizeof(int));")],
        free: t("free($ptr_var);"),
    },
];

// Race condition

pub const RACE_COND_DEC_LINES: [LineTemplate; 2] = [
    t("static int $int_var = $init_num;"),
    t("static pthread_mutex_t $mutex_var;"),
];

pub const LOCK_LINE: LineTemplate = t("pthread_mutex_lock(&$mutex_var);");
pub const UNLOCK_LINE: LineTemplate = t("pthread_mutex_unlock(&$mutex_var);");

/// Mutations of the shared counter `$int_var`.
pub const VAR_OP_LINES: [LineTemplate; 5] = [
    t("$int_var++;"),
    t("$int_var--;"),
    t("++$int_var;"),
    t("--$int_var;"),
    t("$int_var = $int_num;"),
];

// Condition wait

pub const COND_WAIT_DEC_LINES: [LineTemplate; 4] = [
    t("static int $int_var = $init_num;"),
    t("static int $ok_var = 0;"),
    t("struct pthread_mutex_t $mutex_var;"),
    t("struct pthread_cond_t $cond_var;"),
];

/// Re-checks the flag after every wake-up.
pub const WAIT_WHILE_LINES: [LineTemplate; 3] = [
    t("while(!$ok_var){"),
    t("   pthread_cond_wait(&$cond_var, &$mutex_var);"),
    t("}"),
];

/// Checks the flag once; a spurious wake-up slips through.
pub const WAIT_IF_LINES: [LineTemplate; 3] = [
    t("if(!$ok_var){"),
    t("   pthread_cond_wait(&$cond_var, &$mutex_var);"),
    t("}"),
];

// Condition signal

pub const COND_SIGNAL_DEC_LINES: [LineTemplate; 2] = [
    t("struct pthread_mutex_t $mutex_var;"),
    t("struct pthread_cond_t $cond_var;"),
];

pub const SIGNAL_LINE: LineTemplate = t("pthread_cond_signal(&$cond_var);");

// String copy

pub const STRCPY_DEC_LINES: [LineTemplate; 2] = [
    t("char *$str_var1;"),
    t("char $str_var2[$int_num];"),
];

pub const STRCPY_UNCHECKED_LINE: LineTemplate = t("strcpy($str_var2, $str_var1);");
pub const STRCPY_BOUNDED_LINE: LineTemplate = t("strncpy($str_var2, $str_var1, sizeof($str_var2));");

// Control-flow noise

pub const CONTROL_FLOW_DEC_LINE: LineTemplate = t("int $_var;");

pub const CONTROL_FLOW_BLOCKS: [&[LineTemplate]; 3] = [
    &[
        t("for(int $var = $init_num; $var < $int_num; $var++){"),
        t("   $_var = $_num;"),
        t("}"),
    ],
    &[
        t("int $var = $init_num;"),
        t("while($var < $int_num){"),
        t("   $_var = $_num;"),
        t("   $var++;"),
        t("}"),
    ],
    &[
        t("int $var = $init_num;"),
        t("if($var $op $int_num){"),
        t("   $_var = $_num;"),
        t("}"),
    ],
];

pub const RELATIONAL_OPS: [&str; 5] = ["<", ">", "==", "<=", ">="];

// Ordinary declaration noise

pub const ORDINARY_LINES: [LineTemplate; 2] = [t("int $var = rand();"), t("const int $var = $init_num;")];

// Function skeleton

/// Lines before the body. Every one of them is labeled OTHER.
pub const FUNCTION_HEADER: [&str; 10] = [
    "#include <stdlib.h>",
    "#include <string.h>",
    "struct pthread_mutex_t{ int i; };",
    "struct pthread_cond_t{ int i; };",
    "int pthread_mutex_lock(struct pthread_mutex_t* mutex_t){ return 0; }",
    "int pthread_mutex_unlock(struct pthread_mutex_t* mutex_t){ return 0; }",
    "void pthread_cond_wait(struct pthread_cond_t* cond_t, struct pthread_mutex_t* mutex_t);",
    "void pthread_cond_signal(struct pthread_cond_t* cond_t);",
    "int main()",
    "{",
];

/// Lines after the body: the return statement (BODY) and the closing brace (OTHER).
pub const FUNCTION_FOOTER: [&str; 2] = ["    return 0;", "}"];

/// Indentation applied to every body line.
pub const BODY_INDENT: &str = "    ";
