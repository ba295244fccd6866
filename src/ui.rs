pub fn render_tracker(date: &str) -> String {
    page("Food Tracker", &TRACKER_BODY.replace("{{DATE}}", date))
}

pub fn render_stats(week: &str) -> String {
    page("Weekly Statistics", &STATS_BODY.replace("{{WEEK}}", week))
}

fn page(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f6f7f4;
      --ink: #1f2a24;
      --muted: #5f6b64;
      --accent: #10b981;
      --card: #ffffff;
      --shadow: 0 16px 40px rgba(31, 42, 36, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 16px 48px;
    }

    nav {
      display: flex;
      gap: 16px;
      margin: 0 auto 20px;
      max-width: 860px;
    }

    nav a {
      color: var(--accent);
      font-weight: 600;
      text-decoration: none;
    }

    main {
      max-width: 860px;
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px 24px;
    }

    h1 {
      margin: 0 0 4px;
    }

    .muted {
      color: var(--muted);
      margin: 0;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input, select, button {
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid #cfd6d1;
    }

    button {
      background: var(--accent);
      border: none;
      color: #fff;
      cursor: pointer;
    }

    .meal h3 {
      margin: 0 0 10px;
    }

    .chip {
      display: inline-flex;
      gap: 8px;
      align-items: center;
      margin: 0 8px 8px 0;
      padding: 6px 12px;
      border-radius: 999px;
      color: #fff;
      cursor: pointer;
    }

    .tier {
      margin: 6px auto;
      padding: 8px 14px;
      border: 2px solid;
      border-radius: 12px;
      display: flex;
      justify-content: space-between;
      min-width: 32%;
    }

    .row {
      display: flex;
      justify-content: space-between;
      padding: 6px 0;
      border-bottom: 1px solid #eef1ef;
    }
  </style>
</head>
<body>
  <nav>
    <a href="/">Tracker</a>
    <a href="/stats">Statistics</a>
  </nav>
  <main>
{{BODY}}
  </main>
</body>
</html>
"#;

const TRACKER_BODY: &str = r#"    <section class="card">
      <h1>Track Food</h1>
      <p class="muted">Pick a category and a portion, then add it to a meal. Click an item to remove it.</p>
    </section>
    <section class="card controls">
      <input type="date" id="date" value="{{DATE}}" />
      <select id="meal"></select>
      <select id="category"></select>
      <select id="portion"></select>
      <button id="add">Add</button>
    </section>
    <div id="meals"></div>
    <script>
      const MEALS = ['Breakfast', 'Snack 1', 'Lunch', 'Snack 2', 'Dinner'];
      const dateInput = document.getElementById('date');
      let categories = {};

      function option(value, label) {
        const el = document.createElement('option');
        el.value = value;
        el.textContent = label;
        return el;
      }

      async function setup() {
        const [cats, portions] = await Promise.all([
          fetch('/api/categories').then(r => r.json()),
          fetch('/api/portions').then(r => r.json()),
        ]);
        cats.forEach(c => { categories[c.id] = c; });
        MEALS.forEach(m => document.getElementById('meal').append(option(m, m)));
        cats.forEach(c => document.getElementById('category').append(option(c.id, c.label)));
        portions.forEach(p => document.getElementById('portion').append(option(p.id, p.id)));
        await load();
      }

      function render(day) {
        const root = document.getElementById('meals');
        root.innerHTML = '';
        MEALS.forEach(meal => {
          const card = document.createElement('section');
          card.className = 'card meal';
          const title = document.createElement('h3');
          title.textContent = meal;
          card.append(title);
          (day.meals[meal] || []).forEach((item, index) => {
            const meta = categories[item.id] || { label: item.id, color: '#64748b' };
            const chip = document.createElement('span');
            chip.className = 'chip';
            chip.style.background = meta.color;
            chip.textContent = meta.label + ' · ' + item.portion;
            chip.onclick = () => remove(meal, index);
            card.append(chip);
          });
          root.append(card);
        });
      }

      async function load() {
        const res = await fetch('/api/days/' + dateInput.value);
        if (res.ok) render(await res.json());
      }

      async function remove(meal, index) {
        const url = '/api/days/' + dateInput.value + '/entries/' + encodeURIComponent(meal) + '/' + index;
        const res = await fetch(url, { method: 'DELETE' });
        if (res.ok) render(await res.json());
      }

      document.getElementById('add').onclick = async () => {
        const res = await fetch('/api/days/' + dateInput.value + '/entries', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({
            meal: document.getElementById('meal').value,
            category_id: document.getElementById('category').value,
            portion: document.getElementById('portion').value,
          }),
        });
        if (res.ok) render(await res.json());
      };

      dateInput.onchange = load;
      setup();
    </script>
"#;

const STATS_BODY: &str = r#"    <section class="card">
      <h1>Weekly Statistics</h1>
      <p class="muted">Portion scoring: teaspoon=1, spoon=2, cup=3, bowl=4, plate=5.</p>
    </section>
    <section class="card controls">
      <input type="week" id="week" value="{{WEEK}}" />
      <span id="range" class="muted"></span>
      <span id="total" class="muted"></span>
    </section>
    <section class="card">
      <h3>Real Frequency Pyramid</h3>
      <div id="pyramid"></div>
    </section>
    <section class="card">
      <h3>Ranking</h3>
      <div id="ranking"></div>
    </section>
    <script>
      const weekInput = document.getElementById('week');

      function render(stats) {
        document.getElementById('range').textContent = stats.start_date + ' to ' + stats.end_date;
        document.getElementById('total').textContent = 'Total foods logged: ' + stats.total_items;
        const pyramid = document.getElementById('pyramid');
        const ranking = document.getElementById('ranking');
        pyramid.innerHTML = '';
        ranking.innerHTML = '';
        if (stats.ranking.length === 0) {
          pyramid.textContent = 'No tracker data found for this week.';
          ranking.textContent = 'No data yet.';
          return;
        }
        const max = stats.max_score || 1;
        stats.ranking.slice().reverse().forEach((entry, i) => {
          const tier = document.createElement('div');
          tier.className = 'tier';
          tier.style.width = Math.max(32, entry.weighted_score / max * 100) + '%';
          tier.style.borderColor = entry.color;
          tier.innerHTML = '<span></span><span></span>';
          tier.children[0].textContent = '#' + (stats.ranking.length - i) + ' ' + entry.label;
          tier.children[1].textContent = entry.weighted_score + ' pts · ' + entry.times_eaten + 'x';
          pyramid.append(tier);
        });
        stats.ranking.forEach((entry, i) => {
          const row = document.createElement('div');
          row.className = 'row';
          row.innerHTML = '<span></span><strong></strong>';
          row.children[0].textContent = (i + 1) + '. ' + entry.label;
          row.children[1].textContent = entry.weighted_score + ' pts';
          ranking.append(row);
        });
      }

      async function load() {
        const res = await fetch('/api/stats?week=' + encodeURIComponent(weekInput.value));
        if (res.ok) render(await res.json());
      }

      weekInput.onchange = load;
      load();
    </script>
"#;
