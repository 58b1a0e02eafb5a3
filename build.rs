use chrono::TimeZone;

fn get_git_hash() -> String {
	use std::process::Command;

	// Allow builds from `git archive` generated tarballs if output of `git get-tar-commit-id` is
	// set in an env var.
	if let Ok(commit) = std::env::var("BUILD_GIT_COMMIT_ID") {
		return commit.chars().take(7).collect();
	};

	Command::new("git")
		.args(["rev-parse", "--short=7", "--verify", "HEAD"])
		.output()
		.ok()
		.and_then(|output| {
			String::from_utf8_lossy(&output.stdout)
				.lines()
				.next()
				.map(ToString::to_string)
		})
		.filter(|hash| !hash.is_empty())
		.unwrap_or_else(|| String::from("unknown"))
}

fn main() {
	let now = std::env::var("SOURCE_DATE_EPOCH")
		.ok()
		.and_then(|val| val.parse::<i64>().ok())
		.and_then(|secs| {
			chrono::Local.timestamp_opt(secs, 0).single()
		})
		.unwrap_or_else(chrono::Local::now);
	let build_date = now.date_naive();

	let build_name = if std::env::var("PROJINFO_RELEASE").is_ok() {
		format!(
			"{} {} ({})",
			env!("CARGO_PKG_VERSION"),
			build_date,
			get_git_hash()
		)
	} else {
		format!("nightly {} ({})", build_date, get_git_hash())
	};

	println!("cargo:rerun-if-env-changed=PROJINFO_RELEASE");
	println!("cargo:rustc-env=PROJINFO_BUILD_NAME={build_name}");
}
