//! Server-rendered HTML pages.
//!
//! Plain rendering functions returning HTML strings; handlers wrap them in
//! `axum::response::Html`. All user-supplied text goes through [`escape`].

use axum::http::StatusCode;

use crate::db::models::{Plant, Room};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #233; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.3rem 0.6rem; border-bottom: 1px solid #cdd; }
form.inline { display: inline; }
label { display: block; margin-top: 0.6rem; }
.water-me { color: #b33; font-weight: bold; }
.watered { color: #4a4; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} - Verdant</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/plants\">Plants</a><a href=\"/rooms\">Rooms</a>\
         <a href=\"/plants/new\">New plant</a></nav>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn room_options(rooms: &[Room], selected: Option<&str>) -> String {
    let mut out = String::new();
    for room in rooms {
        let sel = if selected == Some(room.room_name.as_str()) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{0}\"{sel}>{0}</option>",
            escape(&room.room_name)
        ));
    }
    out
}

fn plant_fields(rooms: &[Room], plant: Option<&Plant>) -> String {
    let (common, scientific, frequency, light) = match plant {
        Some(p) => (
            escape(&p.common_name),
            escape(&p.scientific_name),
            p.water_frequency.to_string(),
            escape(&p.light),
        ),
        None => (String::new(), String::new(), "7".to_string(), String::new()),
    };
    let selected = plant.and_then(|p| p.room_name.as_deref());
    format!(
        "<label>Common name <input name=\"common_name\" value=\"{common}\" required></label>\n\
         <label>Scientific name <input name=\"scientific_name\" value=\"{scientific}\" required></label>\n\
         <label>Water every (days) <input name=\"water_frequency\" type=\"number\" min=\"1\" value=\"{frequency}\" required></label>\n\
         <label>Light conditions <input name=\"light\" value=\"{light}\" required></label>\n\
         <label>Room <select name=\"room_name\">{}</select></label>\n",
        room_options(rooms, selected)
    )
}

pub fn home_page(plants: &[Plant], rooms: &[Room], filter: Option<&str>) -> String {
    let mut body = String::from("<h1>My plants</h1>\n");

    body.push_str("<form method=\"get\" action=\"/plants\"><select name=\"room_name\">");
    body.push_str("<option value=\"\">All rooms</option>");
    body.push_str(&room_options(rooms, filter));
    body.push_str("</select> <button>Filter</button></form>\n");

    if plants.is_empty() {
        body.push_str("<p>No plants yet.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Plant</th><th>Room</th><th>Status</th></tr>\n");
        for plant in plants {
            let status = if plant.is_due() {
                "<span class=\"water-me\">water me</span>"
            } else {
                "<span class=\"watered\">watered</span>"
            };
            let room = plant
                .room_name
                .as_deref()
                .map(escape)
                .unwrap_or_else(|| "-".to_string());
            body.push_str(&format!(
                "<tr><td><a href=\"/plants/{}\">{}</a></td><td>{room}</td><td>{status}</td></tr>\n",
                plant.id,
                escape(&plant.common_name)
            ));
        }
        body.push_str("</table>\n");
    }

    layout("My plants", &body)
}

pub fn plant_page(plant: &Plant) -> String {
    let room = plant
        .room_name
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "no room assigned".to_string());
    let body = format!(
        "<h1>{name}</h1>\n<table>\n\
         <tr><th>Common Name</th><td>{name}</td></tr>\n\
         <tr><th>Scientific Name</th><td>{scientific}</td></tr>\n\
         <tr><th>Water</th><td>every {frequency} days</td></tr>\n\
         <tr><th>Last Watered On</th><td>{watered}</td></tr>\n\
         <tr><th>Light Conditions</th><td>{light}</td></tr>\n\
         <tr><th>In This Room</th><td>{room}</td></tr>\n\
         </table>\n\
         <form class=\"inline\" method=\"post\" action=\"/plants/{id}/watered\">\
         <button>Watered today</button></form>\n\
         <a href=\"/plants/{id}/edit\">Edit</a>\n\
         <form class=\"inline\" method=\"post\" action=\"/delete/plant\">\
         <input type=\"hidden\" name=\"plant_id\" value=\"{id}\">\
         <button>Delete</button></form>\n",
        id = plant.id,
        name = escape(&plant.common_name),
        scientific = escape(&plant.scientific_name),
        frequency = plant.water_frequency,
        watered = plant.last_watered,
        light = escape(&plant.light),
    );
    layout(&plant.common_name, &body)
}

pub fn new_plant_page(rooms: &[Room]) -> String {
    let body = format!(
        "<h1>New plant</h1>\n<form method=\"post\" action=\"/plants/new\">\n{}\
         <button>Create</button>\n</form>\n",
        plant_fields(rooms, None)
    );
    layout("New plant", &body)
}

pub fn edit_plant_page(plant: &Plant, rooms: &[Room]) -> String {
    let body = format!(
        "<h1>Edit {}</h1>\n<form method=\"post\" action=\"/plants/{}/edit\">\n{}\
         <button>Save</button>\n</form>\n",
        escape(&plant.common_name),
        plant.id,
        plant_fields(rooms, Some(plant))
    );
    layout("Edit plant", &body)
}

pub fn rooms_page(rooms: &[Room]) -> String {
    let mut body = String::from("<h1>Rooms</h1>\n<ul>\n");
    for room in rooms {
        body.push_str(&format!(
            "<li><a href=\"/rooms/{0}\">{1}</a> \
             <form class=\"inline\" method=\"post\" action=\"/delete/room\">\
             <input type=\"hidden\" name=\"room_id\" value=\"{0}\">\
             <button>Delete</button></form></li>\n",
            room.id,
            escape(&room.room_name)
        ));
    }
    body.push_str(
        "</ul>\n<form method=\"post\" action=\"/rooms/new\">\
         <label>Room name <input name=\"room_name\" required></label>\
         <button>Add room</button></form>\n",
    );
    layout("Rooms", &body)
}

pub fn room_page(room: &Room) -> String {
    let body = format!(
        "<h1>{0}</h1>\n<form method=\"post\" action=\"/rooms/{1}\">\
         <label>Room name <input name=\"room_name\" value=\"{0}\" required></label>\
         <button>Rename</button></form>\n",
        escape(&room.room_name),
        room.id
    );
    layout(&room.room_name, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/plants\">Back to plants</a></p>\n",
        status,
        escape(message)
    );
    layout("Error", &body)
}
