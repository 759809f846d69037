/// Custom properties and transitions of every token set.
pub const CSS: &str = include_str!(concat!(env!("OUT_DIR"), "/theme_tokens.css"));

/// Typography mixins of every token set.
pub const SCSS: &str = include_str!(concat!(env!("OUT_DIR"), "/theme_tokens.scss"));

#[test]
fn test() {
    assert!(CSS.contains(".global {"));
    assert!(CSS.contains(".visual_theme_dark {"));
    assert!(CSS.contains("--motion-base-all-transition-fade-default: cubic-bezier(0.4,0,0.2,1) 300ms;"));
    assert!(SCSS.contains("@mixin font-base-all-typography-heading-large {"));
}
