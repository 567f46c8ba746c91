// Script module writers for exported songs
// Each writer embeds the song data and a getNotesAt(tick) query in the target language

use crate::export::song::ExportedSong;
use crate::sequencer::pitch::CENTER_PITCH;

const HEADER: &str = "Generated by step_sequencer";

/// Render a JavaScript (ES module) song
///
/// `getNotesAt(tick)` returns `{ sound, pitch }` objects, with the pitch ratio
/// computed at call time.
pub fn write_javascript(song: &ExportedSong) -> String {
    let name = song.name();
    let mut out = String::new();

    out.push_str(&format!("// {}\n", HEADER));
    out.push_str(&format!("const {} = {{\n", name));
    out.push_str(&format!("  id: {},\n", song.id));
    out.push_str(&format!("  speed: {},\n", js_number(song.speed)));

    let instruments: Vec<String> = song.instruments.iter().map(|s| js_string(s)).collect();
    out.push_str(&format!("  instruments: [{}],\n", instruments.join(", ")));

    if song.data.is_empty() {
        out.push_str("  data: [],\n");
    } else {
        out.push_str("  data: [\n");
        for entry in &song.data {
            out.push_str(&format!(
                "    [{}, {}, {}],\n",
                entry.tick(),
                entry.instrument(),
                entry.pitch()
            ));
        }
        out.push_str("  ],\n");
    }

    out.push_str("  getNotesAt(tick) {\n");
    out.push_str("    return this.data\n");
    out.push_str("      .filter((note) => note[0] === tick)\n");
    out.push_str("      .map((note) => ({\n");
    out.push_str("        sound: this.instruments[note[1]],\n");
    out.push_str(&format!(
        "        pitch: Math.pow(2, (note[2] - {}) / 12),\n",
        CENTER_PITCH
    ));
    out.push_str("      }));\n");
    out.push_str("  },\n");
    out.push_str("};\n\n");
    out.push_str(&format!("export default {};\n", name));

    out
}

/// Render a Lua module song
///
/// `getNotesAt(tick)` returns `{ sound = ..., pitch = ... }` tables. Lua
/// arrays are 1-based, so indices are shifted when reading the tables.
pub fn write_lua(song: &ExportedSong) -> String {
    let name = song.name();
    let mut out = String::new();

    out.push_str(&format!("-- {}\n", HEADER));
    out.push_str(&format!("local {} = {{\n", name));
    out.push_str(&format!("  id = {},\n", song.id));
    out.push_str(&format!("  speed = {},\n", lua_number(song.speed)));

    let instruments: Vec<String> = song.instruments.iter().map(|s| lua_string(s)).collect();
    out.push_str(&format!("  instruments = {{ {} }},\n", instruments.join(", ")));

    if song.data.is_empty() {
        out.push_str("  data = {},\n");
    } else {
        out.push_str("  data = {\n");
        for entry in &song.data {
            out.push_str(&format!(
                "    {{ {}, {}, {} }},\n",
                entry.tick(),
                entry.instrument(),
                entry.pitch()
            ));
        }
        out.push_str("  },\n");
    }
    out.push_str("}\n\n");

    out.push_str(&format!("function {}.getNotesAt(tick)\n", name));
    out.push_str("  local notes = {}\n");
    out.push_str(&format!("  for _, note in ipairs({}.data) do\n", name));
    out.push_str("    if note[1] == tick then\n");
    out.push_str("      notes[#notes + 1] = {\n");
    out.push_str(&format!("        sound = {}.instruments[note[2] + 1],\n", name));
    out.push_str(&format!(
        "        pitch = 2 ^ ((note[3] - {}) / 12),\n",
        CENTER_PITCH
    ));
    out.push_str("      }\n");
    out.push_str("    end\n");
    out.push_str("  end\n");
    out.push_str("  return notes\n");
    out.push_str("end\n\n");
    out.push_str(&format!("return {}\n", name));

    out
}

/// JSON string escaping is valid JavaScript string syntax
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

fn lua_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Three digits so a following digit is not read as part of the escape
            c if c.is_control() && (c as u32) < 256 => {
                out.push_str(&format!("\\{:03}", c as u32))
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn lua_number(value: f64) -> String {
    if value.is_nan() {
        "(0 / 0)".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "math.huge" } else { "-math.huge" }.to_string()
    } else {
        value.to_string()
    }
}
