/// Demonstration inputs for `calcbot suite`, one session in order
pub const DEMONSTRATION_INPUTS: &[&str] = &[
    // arithmetic
    "5 * 6",
    "12 - 7",
    "2^e",
    "sqrt(56)",
    // variables
    "x = 10",
    "x + 7",
    "valid_var = 5",
    // natural language
    "What is 5 plus 5?",
    "Calculate the log of 100.",
    "What is the square root of 25?",
    "Calculate the sine of 90 degrees.",
    "What is 5 to the power of 3?",
    // rejected input
    "5+",
    "sqrt(abcd)",
    "y + 10",
    // calculus
    "d/dx(x^2 + 3x)",
    "integrate(x^2 + 3x, x)",
    // linear algebra
    "det([[1, 2], [3, 4]])",
    "inv([[1, 2], [3, 4]])",
    "get_variables",
    "(5 + 3) * 4",
    "log(5)",
    "5 / 0",
    "sin(90)",
    // rewrite suggestions
    "sin(90) + sin(90)",
    "log(100) + log(100)",
    "5 + 5 + 5",
    "2 * 2 * 2",
    "What is 10 minus 3?",
    "Calculate the square root of 64.",
    "What is the factorial of 5?",
    "What is the absolute value of -7?",
    "What is 2 times 3?",
    "What is 10 divided by 2?",
    "What is the cosine of 60 degrees?",
    "What is the tangent of 45 degrees?",
    "d/dx(sin(x))",
    "integrate(cos(x), x)",
    "det([[2, 0], [0, 2]])",
    "inv([[2, 0], [0, 2]])",
];
