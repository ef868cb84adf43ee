use leptos::prelude::*;

use crate::components::showcase::ShowcaseCanvas;
use crate::components::tech_network::TechNetworkCanvas;
use crate::scene::{ContentItem, ContentLink, SceneConfig};

fn tech(id: &str, name: &str, category: &str) -> ContentItem {
	ContentItem {
		image_ref: format!("icons/{}.svg", id),
		..ContentItem::new(id, name, category)
	}
}

/// Technologies shown on the network sphere.
fn technologies() -> Vec<ContentItem> {
	vec![
		tech("cpp", "C++", "language"),
		tech("js", "JavaScript", "language"),
		tech("react", "React JS", "frontend"),
		tech("node", "Node JS", "backend"),
		tech("express", "Express JS", "backend"),
		tech("socketio", "Socket.IO", "realtime"),
		tech("redux", "Redux", "frontend"),
		tech("tailwind", "Tailwind CSS", "frontend"),
		tech("mongodb", "MongoDB", "database"),
		tech("mysql", "MySQL", "database"),
		tech("git", "Git", "tooling"),
		tech("postman", "Postman", "tooling"),
	]
}

fn project(id: &str, name: &str, summary: &str, tags: &[&str], code: &str, live: &str) -> ContentItem {
	ContentItem {
		image_ref: "/placeholder.jpg".into(),
		links: vec![
			ContentLink {
				label: "CODE".into(),
				href: code.into(),
			},
			ContentLink {
				label: "LIVE DEMO".into(),
				href: live.into(),
			},
		],
		summary: Some(summary.into()),
		tags: tags.iter().map(|t| t.to_string()).collect(),
		..ContentItem::new(id, name, "project")
	}
}

/// Projects shown in the scrolling showcase.
fn projects() -> Vec<ContentItem> {
	vec![
		project(
			"smart-bins",
			"Next Gen Smart Waste Bins",
			"CVRP route optimization with real-time Socket.IO updates and a live map dashboard for bin monitoring.",
			&["react", "socket.io", "cvrp"],
			"https://github.com/Madan2468/NEXT-GENERATION-SMART-WASTE-BINS",
			"https://next-generation-smart-waste-bins-frontend.onrender.com",
		),
		project(
			"leaderboard",
			"Competitive Coding Leaderboard",
			"Real-time coding performance tracker combining LeetCode, Codeforces and GitHub with a custom ranking.",
			&["react", "node", "api"],
			"https://github.com/Madan2468/Competitve-Coding-leaderboard",
			"https://competitive-coding-leaderboard.vercel.app",
		),
		project(
			"resqlink",
			"ResQLink",
			"Animal rescue platform for reporting injured animals with images, location and urgency.",
			&["mern", "socket.io", "geolocation"],
			"https://github.com/Madan2468/resqlink_backend",
			"https://resq-link-frontend.vercel.app",
		),
	]
}

/// Home page with both visualizations. Invalid scene settings surface
/// through the error boundary instead of blank canvases.
#[component]
pub fn Home() -> impl IntoView {
	let tech_data = Signal::derive(technologies);
	let project_data = Signal::derive(projects);
	let config = SceneConfig::default();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{config
				.validate()
				.map(|()| {
					let SceneConfig { network, showcase } = config;
					view! {
						<section id="tech" class="scene-section">
							<p class="eyebrow">"Tech Stack"</p>
							<h2>"Technologies."</h2>
							<div class="scene-frame" style="width: 100%; height: 600px;">
								<TechNetworkCanvas data=tech_data config=network />
							</div>
						</section>

						<section id="work" class="scene-section">
							<p class="eyebrow">"Portfolio"</p>
							<h2>"Projects."</h2>
							<div class="scene-frame" style="width: 100%; height: 800px;">
								<ShowcaseCanvas data=project_data config=showcase />
							</div>
						</section>
					}
				})}
		</ErrorBoundary>
	}
}
