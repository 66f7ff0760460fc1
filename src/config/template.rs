/// Generate the template written by `antpath --init`.
pub fn generate_init_template() -> String {
	r#"# antpath configuration
#
# Routes are tried in order. Sub-routes are tried before their parent,
# and the first route whose pattern matches the request path is used.
#
# Patterns:
#   ?   one character
#   *   any characters within one segment
#   **  zero or more whole segments

# Stop looking for .antpath.toml files in parent directories.
root = true

# separator = "/"
# login-path = "/auth/login"
# max-pattern-segments = 32

[[routes]]
path = "/admin/**"
conditions = [{ type = "require_env", var = "ANTPATH_ADMIN" }]

[[routes.sub_routes]]
path = "/admin/legacy/**"
conditions = [{ type = "redirect", to = "/admin", keep_wildcard = true }]

[[routes]]
path = "/account/*"
conditions = [{ type = "deny" }]
"#
	.to_string()
}
