
use crate::cop::registry::CopRegistry;

/// Test-file globs the Playwright cops apply to by default.
pub const PLAYWRIGHT_DEFAULT_INCLUDE: &[&str] = &[
    "**/*.spec.js",
    "**/*.spec.mjs",
    "**/*.spec.jsx",
    "**/*.spec.ts",
    "**/*.spec.tsx",
    "**/*.test.js",
    "**/*.test.mjs",
    "**/*.test.jsx",
    "**/*.test.ts",
    "**/*.test.tsx",
];

pub fn register_all(registry: &mut CopRegistry) {
    registry.register(Box::new(no_skipped_test::NoSkippedTest));
    registry.register(Box::new(no_focused_test::NoFocusedTest));
}
